//! Definite assignment analysis for variables.
//!
//! This module implements dataflow analysis to track which variables are definitely
//! assigned before use. This helps catch use-before-assignment errors.

use rustc_hash::{FxHashMap, FxHashSet};
use typhon_ast::ast::AST;
use typhon_ast::nodes::{
    AssignmentExpr,
    AssignmentStmt,
    AugmentedAssignmentStmt,
    ForStmt,
    FunctionDecl,
    IfStmt,
    NodeID,
    NodeKind,
    ParameterIdent,
    VariableDecl,
    VariableExpr,
    WhileStmt,
};

use super::control_flow::BlockId;
use super::ControlFlowGraph;
use crate::error::CfgError;

/// Names always considered assigned, independent of any CFG analysis.
const BUILTINS: &[&str] = &[
    "abs", "all", "any", "bool", "dict", "enumerate", "filter", "float", "int", "len", "list",
    "map", "max", "min", "next", "object", "open", "print", "range", "repr", "reversed", "round",
    "set", "sorted", "str", "sum", "tuple", "type", "zip", "None", "True", "False",
    "Exception", "ValueError", "TypeError", "KeyError", "IndexError", "StopIteration",
];

/// Tracks definitely-assigned variables through control flow.
#[derive(Debug)]
pub struct DefiniteAssignmentAnalyzer<'ctx> {
    /// The control flow graph
    cfg: &'ctx ControlFlowGraph,
    /// Definitely-assigned variables at the start of each block
    block_in: FxHashMap<BlockId, FxHashSet<String>>,
    /// Definitely-assigned variables at the end of each block
    block_out: FxHashMap<BlockId, FxHashSet<String>>,
    /// Variables assigned in each block
    block_gen: FxHashMap<BlockId, FxHashSet<String>>,
    /// Collected errors
    errors: Vec<CfgError>,
}

impl<'ctx> DefiniteAssignmentAnalyzer<'ctx> {
    /// Creates a new analyzer for the given CFG.
    #[must_use]
    pub fn new(cfg: &'ctx ControlFlowGraph) -> Self {
        Self {
            cfg,
            block_in: FxHashMap::default(),
            block_out: FxHashMap::default(),
            block_gen: FxHashMap::default(),
            errors: Vec::new(),
        }
    }

    /// Analyzes the CFG and returns any definite assignment errors.
    ///
    /// ## Errors
    ///
    /// Returns collected errors if any variables are used before assignment.
    pub fn analyze(
        &mut self,
        ast: &AST,
        body: &[NodeID],
        func_id: Option<NodeID>,
    ) -> Result<(), Vec<CfgError>> {
        self.initialize_parameters(ast, func_id);
        self.collect_loop_targets(ast, body);

        let block_ids: Vec<BlockId> = self.cfg.blocks().map(|b| b.id).collect();
        for block_id in block_ids {
            self.compute_gen_set(block_id, ast);
        }

        self.compute_dataflow();
        self.validate_uses(ast);

        if !self.errors.is_empty() {
            return Err(std::mem::take(&mut self.errors));
        }

        Ok(())
    }

    /// Gets the collected errors.
    #[must_use]
    pub fn errors(&self) -> &[CfgError] { &self.errors }

    /// Checks if a variable is definitely assigned at a given block.
    #[must_use]
    pub fn is_definitely_assigned(&self, var_name: &str, block_id: BlockId) -> bool {
        self.block_in.get(&block_id).is_some_and(|vars| vars.contains(var_name))
    }

    /// Initializes the entry block with function parameters (if `func_id`
    /// resolves to one — it is `None` for module and class scopes) and
    /// builtins, which are always definitely assigned.
    fn initialize_parameters(&mut self, ast: &AST, func_id: Option<NodeID>) {
        let mut assigned = FxHashSet::default();

        if let Some(func_id) = func_id
            && let Ok(func) = ast.get_as::<FunctionDecl>(func_id)
        {
            for param_id in &func.parameters {
                if let Ok(param) = ast.get_as::<ParameterIdent>(*param_id) {
                    let _ = assigned.insert(param.name.clone());
                }
            }
        }

        for builtin in BUILTINS {
            let _ = assigned.insert((*builtin).to_string());
        }

        let entry_block = self.cfg.entry_block();
        drop(self.block_in.insert(entry_block.id, assigned));
    }

    /// Checks for uses of variables in a statement, ensuring they're assigned.
    fn check_uses_in_statement(&mut self, node_id: NodeID, ast: &AST, assigned: &FxHashSet<String>) {
        self.check_uses_in_statement_impl(node_id, ast, assigned, None);
    }

    /// Internal implementation of `check_uses_in_statement` with `skip_node` support.
    ///
    /// The `skip_node` parameter allows skipping a specific node (used for for-loop targets).
    fn check_uses_in_statement_impl(
        &mut self,
        node_id: NodeID,
        ast: &AST,
        assigned: &FxHashSet<String>,
        skip_node: Option<NodeID>,
    ) {
        if skip_node == Some(node_id) {
            return;
        }

        let Some(node) = ast.get_node(node_id) else { return };

        match node.kind {
            NodeKind::Expression => {
                if let Ok(var_expr) = ast.get_as::<VariableExpr>(node_id)
                    && !assigned.contains(&var_expr.name)
                {
                    self.errors.push(CfgError::UseBeforeAssignment {
                        name: var_expr.name.clone(),
                        span: var_expr.span,
                    });
                }

                for child_id in node.data.children() {
                    self.check_uses_in_statement_impl(child_id, ast, assigned, skip_node);
                }
            }

            NodeKind::Statement => {
                if let Ok(assign) = ast.get_as::<AssignmentStmt>(node_id) {
                    self.check_uses_in_statement_impl(assign.value, ast, assigned, skip_node);
                } else if let Ok(aug_assign) = ast.get_as::<AugmentedAssignmentStmt>(node_id) {
                    self.check_uses_in_statement_impl(aug_assign.target, ast, assigned, skip_node);
                    self.check_uses_in_statement_impl(aug_assign.value, ast, assigned, skip_node);
                } else if let Ok(for_stmt) = ast.get_as::<ForStmt>(node_id) {
                    self.check_uses_in_statement_impl(
                        for_stmt.iter,
                        ast,
                        assigned,
                        Some(for_stmt.target),
                    );

                    let mut loop_assigned = assigned.clone();
                    Self::collect_assignment_target(for_stmt.target, ast, &mut loop_assigned);

                    for &body_stmt in &for_stmt.body {
                        self.check_uses_in_statement_impl(body_stmt, ast, &loop_assigned, None);
                    }

                    if let Some(else_body) = &for_stmt.else_body {
                        for &else_stmt in else_body {
                            self.check_uses_in_statement_impl(else_stmt, ast, assigned, None);
                        }
                    }
                } else {
                    for child_id in node.data.children() {
                        self.check_uses_in_statement_impl(child_id, ast, assigned, skip_node);
                    }
                }
            }

            _ => {
                for child_id in node.data.children() {
                    self.check_uses_in_statement_impl(child_id, ast, assigned, skip_node);
                }
            }
        }
    }

    /// Collects variable names from an assignment target.
    fn collect_assignment_target(target_id: NodeID, ast: &AST, assignments: &mut FxHashSet<String>) {
        let Some(node) = ast.get_node(target_id) else { return };

        match node.kind {
            NodeKind::Identifier | NodeKind::Expression => {
                if let Ok(var_expr) = ast.get_as::<VariableExpr>(target_id) {
                    let _ = assignments.insert(var_expr.name.clone());
                }

                for child_id in node.data.children() {
                    Self::collect_assignment_target(child_id, ast, assignments);
                }
            }
            _ => {
                for child_id in node.data.children() {
                    Self::collect_assignment_target(child_id, ast, assignments);
                }
            }
        }
    }

    /// Recursively collects all assignments in a statement and its children.
    fn collect_assignments(node_id: NodeID, ast: &AST, assignments: &mut FxHashSet<String>) {
        let Some(node) = ast.get_node(node_id) else { return };

        match node.kind {
            NodeKind::Declaration => {
                if let Ok(var_decl) = ast.get_as::<VariableDecl>(node_id)
                    && var_decl.value.is_some()
                {
                    let _ = assignments.insert(var_decl.name.clone());
                }

                for child_id in node.data.children() {
                    Self::collect_assignments(child_id, ast, assignments);
                }
            }
            NodeKind::Statement => {
                if let Ok(assign) = ast.get_as::<AssignmentStmt>(node_id) {
                    Self::collect_assignment_target(assign.target, ast, assignments);
                } else if let Ok(aug_assign) = ast.get_as::<AugmentedAssignmentStmt>(node_id) {
                    Self::collect_assignment_target(aug_assign.target, ast, assignments);
                } else if let Ok(for_stmt) = ast.get_as::<ForStmt>(node_id) {
                    Self::collect_assignment_target(for_stmt.target, ast, assignments);
                } else if ast.get_as::<IfStmt>(node_id).is_ok()
                    || ast.get_as::<WhileStmt>(node_id).is_ok()
                    || ast.get_as::<ForStmt>(node_id).is_ok()
                {
                    // Bodies live in separate blocks; their assignments
                    // must not leak into this block's GEN set.
                    return;
                }

                for child_id in node.data.children() {
                    Self::collect_assignments(child_id, ast, assignments);
                }
            }
            NodeKind::Expression => {
                if let Ok(assign_expr) = ast.get_as::<AssignmentExpr>(node_id) {
                    Self::collect_assignment_target(assign_expr.target, ast, assignments);
                }

                for child_id in node.data.children() {
                    Self::collect_assignments(child_id, ast, assignments);
                }
            }
            _ => {
                for child_id in node.data.children() {
                    Self::collect_assignments(child_id, ast, assignments);
                }
            }
        }
    }

    /// Performs forward dataflow analysis to compute IN/OUT sets.
    fn compute_dataflow(&mut self) {
        let mut changed = true;
        let entry_id = self.cfg.entry_block().id;

        while changed {
            changed = false;

            let block_ids: Vec<BlockId> = self.cfg.blocks().map(|b| b.id).collect();
            for block_id in block_ids {
                let Some(block) = self.cfg.get_block(block_id) else { continue };
                let predecessors = block.predecessors.clone();

                let in_set = if block_id == entry_id {
                    self.block_in.get(&block_id).cloned().unwrap_or_default()
                } else if predecessors.is_empty() {
                    FxHashSet::default()
                } else {
                    let mut in_set: Option<FxHashSet<String>> = None;
                    for pred_id in &predecessors {
                        if let Some(pred_out) = self.block_out.get(pred_id) {
                            if let Some(ref mut current) = in_set {
                                current.retain(|var| pred_out.contains(var));
                            } else {
                                in_set = Some(pred_out.clone());
                            }
                        }
                    }

                    in_set.unwrap_or_default()
                };

                if block_id != entry_id {
                    let old_in = self.block_in.get(&block_id).cloned().unwrap_or_default();
                    if in_set != old_in {
                        drop(self.block_in.insert(block_id, in_set.clone()));
                        changed = true;
                    }
                }

                let gen_set = self.block_gen.get(&block_id).cloned().unwrap_or_default();
                let mut out_set = in_set;
                out_set.extend(gen_set);

                let old_out = self.block_out.get(&block_id).cloned().unwrap_or_default();
                if out_set != old_out {
                    drop(self.block_out.insert(block_id, out_set));
                    changed = true;
                }
            }
        }
    }

    /// Collects for-loop targets and adds them to the GEN sets of loop condition blocks.
    fn collect_loop_targets(&mut self, ast: &AST, body: &[NodeID]) {
        for &stmt_id in body {
            self.collect_loop_targets_from_stmt(stmt_id, ast);
        }
    }

    /// Recursively collects for-loop targets from a statement tree.
    fn collect_loop_targets_from_stmt(&mut self, stmt_id: NodeID, ast: &AST) {
        if let Ok(for_stmt) = ast.get_as::<ForStmt>(stmt_id) {
            let mut target_block_id = None;
            for block in self.cfg.blocks() {
                if block.statements.contains(&for_stmt.iter) {
                    target_block_id = Some(block.id);
                    break;
                }
            }

            if let Some(block_id) = target_block_id {
                let mut temp_vars = FxHashSet::default();
                Self::collect_assignment_target(for_stmt.target, ast, &mut temp_vars);
                self.block_gen.entry(block_id).or_default().extend(temp_vars);
            }

            for &body_stmt in &for_stmt.body {
                self.collect_loop_targets_from_stmt(body_stmt, ast);
            }

            if let Some(else_body) = &for_stmt.else_body {
                for &else_stmt in else_body {
                    self.collect_loop_targets_from_stmt(else_stmt, ast);
                }
            }
        } else {
            let Some(node) = ast.get_node(stmt_id) else { return };
            for child_id in node.data.children() {
                self.collect_loop_targets_from_stmt(child_id, ast);
            }
        }
    }

    /// Computes the GEN set for a block (variables assigned in the block).
    fn compute_gen_set(&mut self, block_id: BlockId, ast: &AST) {
        let mut gen_set = self.block_gen.get(&block_id).cloned().unwrap_or_default();

        if let Some(block) = self.cfg.get_block(block_id) {
            for &stmt_id in &block.statements {
                Self::collect_assignments(stmt_id, ast, &mut gen_set);
            }
        }

        drop(self.block_gen.insert(block_id, gen_set));
    }

    /// Validates that all variable uses have prior assignments.
    fn validate_uses(&mut self, ast: &AST) {
        let block_ids: Vec<BlockId> = self.cfg.blocks().map(|b| b.id).collect();
        for block_id in block_ids {
            let Some(block) = self.cfg.get_block(block_id) else { continue };
            let statements = block.statements.clone();
            let mut assigned = self.block_in.get(&block_id).cloned().unwrap_or_default();

            for stmt_id in statements {
                self.check_uses_in_statement(stmt_id, ast, &assigned);
                Self::collect_assignments(stmt_id, ast, &mut assigned);
            }
        }
    }
}
