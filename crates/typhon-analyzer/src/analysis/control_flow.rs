//! Control-flow graph data model.
//!
//! This module owns the graph shape: blocks, guarded edges, and the nested
//! per-function/per-class CFG maps. Construction (the AST walk that
//! populates a [`ControlFlowGraph`]) lives in [`super::cfg_builder`]; this
//! module is the structure that walk builds and the later analyses
//! ([`super::dead_code`], [`super::definite_assignment`]) read.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use rustc_hash::{FxHashMap, FxHashSet};
use typhon_ast::nodes::NodeID;

/// A process-wide unique block identifier.
///
/// Allocated from a single global counter so that IDs stay unique across
/// every CFG built in one process run, including nested function/class
/// CFGs built recursively during the same walk (`SPEC_FULL.md` §3, §5).
/// Because nested builds interleave with their enclosing build, a CFG's
/// block IDs are not densely packed from zero — `blocks` is therefore a
/// map, not a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    /// Allocates the next globally-unique block ID.
    fn next() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value, for display and testing.
    #[must_use]
    pub const fn value(self) -> usize { self.0 }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "b{}", self.0) }
}

/// Generates a process-unique temporary-variable name.
///
/// One of the two disjoint fresh-name namespaces required by
/// `SPEC_FULL.md` §6 (the other is [`fresh_generator_name`]).
#[must_use]
pub fn fresh_temp_name() -> String {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    format!("__cfg_tmp_{}", NEXT.fetch_add(1, Ordering::Relaxed))
}

/// Generates a process-unique name for a synthesized generator/lambda function.
#[must_use]
pub fn fresh_generator_name(base: &str) -> String {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    format!("__cfg_gen_{base}_{}", NEXT.fetch_add(1, Ordering::Relaxed))
}

/// The annotation on a conditional edge between two blocks.
///
/// Real AST conditions (`Expr`) and the literal sentinel labels the `Try`
/// lowering uses ("Finally", "No Error", a bare exception type, ...) share
/// one type so that empty-block elimination can combine either kind
/// uniformly. Conjunction is represented symbolically rather than by
/// synthesizing a new AST `and`-node, since the builder's arena access does
/// not outlive the structural walk — see `SPEC_FULL.md` §9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guard {
    /// Unconditional edge.
    None,
    /// Guarded by a real AST expression (e.g. an `If` condition).
    Expr(NodeID),
    /// Guarded by a literal label that has no AST representation.
    Sentinel(&'static str),
    /// The conjunction of two guards, produced by compaction.
    And(Box<Guard>, Box<Guard>),
}

impl Guard {
    /// Combines two guards with logical AND, dropping either side that is
    /// unconditional rather than nesting a no-op conjunction.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::None, g) | (g, Self::None) => g,
            (a, b) => Self::And(Box::new(a), Box::new(b)),
        }
    }

    /// True if this guard is unconditional.
    #[must_use]
    pub const fn is_none(&self) -> bool { matches!(self, Self::None) }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "<always>"),
            Self::Expr(id) => write!(f, "{id}"),
            Self::Sentinel(label) => write!(f, "{label}"),
            Self::And(a, b) => write!(f, "({a}) and ({b})"),
        }
    }
}

/// What a [`BasicBlock`] additionally declares beyond its statement list.
///
/// Ports the source's `FuncBlock`/`CallBlock` specializations as a tag on
/// one struct rather than a parallel type hierarchy, following the same
/// closed-tagged-union idiom the host AST uses for node kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// An ordinary block.
    Plain,
    /// A block that declares a nested function (or lambda/generator lifted
    /// to one).
    Func {
        /// The declared function's name.
        name: String,
        /// The declared function's parameter names, in order.
        parameter_names: Vec<String>,
    },
    /// A block marking a call site with a dedicated return-point block.
    Call {
        /// Display text for the call's arguments, for rendering.
        arg_display: String,
        /// The block containing the call itself.
        call_id: BlockId,
        /// The dedicated return-point block.
        exit_id: BlockId,
    },
}

/// A basic block: a maximal straight-line run of statements.
#[derive(Debug, Clone)]
pub struct BasicBlock {
    /// Unique identifier for this block.
    pub id: BlockId,
    /// What kind of block this is, beyond "plain".
    pub kind: BlockKind,
    /// AST statement nodes contained in this block, in order.
    pub statements: Vec<NodeID>,
    /// IDs of predecessor blocks.
    pub predecessors: Vec<BlockId>,
    /// IDs of successor blocks.
    pub successors: Vec<BlockId>,
    /// Display strings for calls made in this block (rendering aid).
    pub calls: Vec<String>,
    /// Set once this block ends in `return`/`break`/`continue`/`raise`, so
    /// callers know not to add a normal fallthrough edge out of it.
    pub has_terminator: bool,
}

impl BasicBlock {
    fn new(id: BlockId) -> Self {
        Self {
            id,
            kind: BlockKind::Plain,
            statements: Vec::new(),
            predecessors: Vec::new(),
            successors: Vec::new(),
            calls: Vec::new(),
            has_terminator: false,
        }
    }
}

/// A control-flow graph for a module, function, method, or class body.
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    /// A human-readable name (module name, function name, class name).
    pub name: String,
    /// The entry block.
    pub start: BlockId,
    /// Blocks ending in `return` or a failing `assert` (`SPEC_FULL.md` I5).
    pub final_blocks: Vec<BlockId>,
    blocks: FxHashMap<BlockId, BasicBlock>,
    /// `(from, to) -> guard`. `None`-guard means unconditional.
    pub edges: FxHashMap<(BlockId, BlockId), Guard>,
    /// Mirror of `edges.keys()`, kept in lock-step on every edit (resolves
    /// the `flows`/`edges` desync the source risked — `SPEC_FULL.md` §9).
    pub flows: FxHashSet<(BlockId, BlockId)>,
    /// `function_name -> (parameters_with_defaults, nested CFG)`.
    pub func_cfgs: FxHashMap<String, (Vec<(String, Option<NodeID>)>, ControlFlowGraph)>,
    /// `class_name -> nested CFG`.
    pub class_cfgs: FxHashMap<String, ControlFlowGraph>,
    reachable: Option<FxHashSet<BlockId>>,
}

impl ControlFlowGraph {
    /// Creates a new CFG with a single empty entry block.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let mut blocks = FxHashMap::default();
        let start = BlockId::next();
        drop(blocks.insert(start, BasicBlock::new(start)));

        Self {
            name: name.into(),
            start,
            final_blocks: Vec::new(),
            blocks,
            edges: FxHashMap::default(),
            flows: FxHashSet::default(),
            func_cfgs: FxHashMap::default(),
            class_cfgs: FxHashMap::default(),
            reachable: None,
        }
    }

    /// Allocates and registers a new empty block.
    pub fn new_block(&mut self) -> BlockId {
        let id = BlockId::next();
        drop(self.blocks.insert(id, BasicBlock::new(id)));
        self.reachable = None;
        id
    }

    /// Appends a statement to a block.
    pub fn add_stmt(&mut self, block: BlockId, stmt: NodeID) {
        if let Some(block) = self.blocks.get_mut(&block) {
            block.statements.push(stmt);
        }
    }

    /// Adds a (possibly guarded) edge from `from` to `to`.
    ///
    /// Mirrors `SPEC_FULL.md` §4.1: updates both blocks' adjacency lists,
    /// `edges`, and `flows` together so the three never drift apart. First
    /// write wins for the guard on a repeated `(from, to)` pair (invariant
    /// 5).
    pub fn add_edge(&mut self, from: BlockId, to: BlockId, guard: Guard) {
        if let Some(block) = self.blocks.get_mut(&from)
            && !block.successors.contains(&to)
        {
            block.successors.push(to);
        }
        if let Some(block) = self.blocks.get_mut(&to)
            && !block.predecessors.contains(&from)
        {
            block.predecessors.push(from);
        }

        let _ = self.edges.entry((from, to)).or_insert(guard);
        let _ = self.flows.insert((from, to));
        self.reachable = None;
    }

    /// Returns a mutable reference to a block, if it exists.
    pub fn get_block_mut(&mut self, id: BlockId) -> Option<&mut BasicBlock> {
        self.blocks.get_mut(&id)
    }

    /// Returns a reference to a block, if it exists.
    #[must_use]
    pub fn get_block(&self, id: BlockId) -> Option<&BasicBlock> { self.blocks.get(&id) }

    /// Returns the entry block.
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // start always exists by construction
    pub fn entry_block(&self) -> &BasicBlock {
        self.blocks.get(&self.start).unwrap_or_else(|| unreachable!("start block always exists"))
    }

    /// Iterates over all blocks, in unspecified order.
    pub fn blocks(&self) -> impl Iterator<Item = &BasicBlock> { self.blocks.values() }

    /// Number of blocks currently in the graph.
    #[must_use]
    pub fn block_count(&self) -> usize { self.blocks.len() }

    /// Computes (and caches) the set of blocks reachable from `start`.
    pub fn compute_reachable(&mut self) -> &FxHashSet<BlockId> {
        if self.reachable.is_none() {
            let mut reachable = FxHashSet::default();
            let mut stack = vec![self.start];

            while let Some(id) = stack.pop() {
                if reachable.insert(id)
                    && let Some(block) = self.blocks.get(&id)
                {
                    for &succ in &block.successors {
                        if !reachable.contains(&succ) {
                            stack.push(succ);
                        }
                    }
                }
            }

            self.reachable = Some(reachable);
        }

        self.reachable.as_ref().unwrap_or_else(|| unreachable!())
    }

    /// True if `id` is reachable from `start`.
    pub fn is_reachable(&mut self, id: BlockId) -> bool { self.compute_reachable().contains(&id) }

    /// Removes every reachable empty block, reconnecting its predecessors
    /// to its successors with the AND of the two surrounding guards.
    ///
    /// Implements `SPEC_FULL.md` §4.4. A single visited-set gates each
    /// block to at most one elimination attempt, which is what makes the
    /// pass terminate on cycles of empty blocks and is also what makes it
    /// idempotent (running it again finds nothing left to eliminate).
    pub fn eliminate_empty_blocks(&mut self) {
        let order = self.post_order_from_start();
        let mut removed: FxHashSet<BlockId> = FxHashSet::default();

        for id in order {
            if removed.contains(&id) || id == self.start {
                continue;
            }

            let Some(block) = self.blocks.get(&id) else { continue };
            if !block.statements.is_empty() {
                continue;
            }

            let preds = block.predecessors.clone();
            let succs = block.successors.clone();

            for &pred in &preds {
                for &succ in &succs {
                    if pred == id || succ == id {
                        continue;
                    }
                    let guard_in = self.edges.get(&(pred, id)).cloned().unwrap_or(Guard::None);
                    let guard_out = self.edges.get(&(id, succ)).cloned().unwrap_or(Guard::None);
                    self.splice_edge(pred, succ, guard_in.and(guard_out));
                }
            }

            self.detach(id);
            let _ = removed.insert(id);
        }

        self.reachable = None;
    }

    /// Post-order traversal of blocks reachable from `start` (used by
    /// [`Self::eliminate_empty_blocks`]). Each block appears exactly once.
    fn post_order_from_start(&self) -> Vec<BlockId> {
        let mut visited: FxHashSet<BlockId> = FxHashSet::default();
        let mut order = Vec::new();
        let mut stack = vec![(self.start, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            if !visited.insert(id) {
                continue;
            }
            stack.push((id, true));
            if let Some(block) = self.blocks.get(&id) {
                for &succ in &block.successors {
                    if !visited.contains(&succ) {
                        stack.push((succ, false));
                    }
                }
            }
        }

        order
    }

    /// Connects `from -> to` with `guard`, leaving any existing edge
    /// between the two alone (first write wins, invariant 5) but always
    /// fixing up adjacency lists.
    fn splice_edge(&mut self, from: BlockId, to: BlockId, guard: Guard) {
        if self.edges.contains_key(&(from, to)) {
            return;
        }
        self.add_edge(from, to, guard);
    }

    /// Removes a block from every adjacency list and edge map entry that
    /// references it, then drops the block itself.
    fn detach(&mut self, id: BlockId) {
        let preds = self.blocks.get(&id).map(|b| b.predecessors.clone()).unwrap_or_default();
        let succs = self.blocks.get(&id).map(|b| b.successors.clone()).unwrap_or_default();

        for pred in preds {
            if let Some(block) = self.blocks.get_mut(&pred) {
                block.successors.retain(|&s| s != id);
            }
            let _ = self.edges.remove(&(pred, id));
            let _ = self.flows.remove(&(pred, id));
        }
        for succ in succs {
            if let Some(block) = self.blocks.get_mut(&succ) {
                block.predecessors.retain(|&p| p != id);
            }
            let _ = self.edges.remove(&(id, succ));
            let _ = self.flows.remove(&(id, succ));
        }

        let _ = self.blocks.remove(&id);
        self.final_blocks.retain(|&b| b != id);
    }
}
