//! Builds [`ControlFlowGraph`]s by walking the AST.
//!
//! The walk is a single recursive descent over statements. Expressions are
//! never walked for control flow in their own right — a `Call` expression can
//! branch into a callee's body (see [`CfgBuilder::fold_nested_calls`]) but
//! plain expressions are just appended to the current block's statement
//! list. Each function body, class body, and synthesized generator body gets
//! its own nested [`ControlFlowGraph`], mirroring the nesting of scopes in
//! the source.

use typhon_ast::ast::AST;
use typhon_ast::nodes::{
    AnyNode,
    ArgumentExpr,
    AssertStmt,
    AssignmentStmt,
    AsyncForStmt,
    AsyncFunctionDecl,
    AsyncWithStmt,
    AttributeExpr,
    AugmentedAssignmentStmt,
    BinaryOpExpr,
    BinaryOpKind,
    BreakStmt,
    CallExpr,
    ClassDecl,
    ComprehensionFor,
    ContinueStmt,
    DictComprehensionExpr,
    ExceptHandler,
    ExpressionStmt,
    ForStmt,
    FunctionDecl,
    GeneratorExpr,
    IfStmt,
    LambdaExpr,
    ListComprehensionExpr,
    ListExpr,
    LiteralExpr,
    LiteralValue,
    Module,
    NodeID,
    NodeKind,
    ParameterIdent,
    RaiseStmt,
    ReturnStmt,
    SetComprehensionExpr,
    SubscriptionExpr,
    TernaryExpr,
    TryStmt,
    VariableExpr,
    WhileStmt,
    WithStmt,
    YieldExpr,
};
use typhon_source::types::Span;

use crate::analysis::control_flow::{
    fresh_generator_name,
    fresh_temp_name,
    BlockId,
    BlockKind,
    ControlFlowGraph,
    Guard,
};
use crate::error::CfgError;

/// A loop's break target (exit) and continue target (guard re-entry).
#[derive(Debug, Clone, Copy)]
struct LoopFrame {
    guard: BlockId,
    exit: BlockId,
}

/// Walks an AST and accumulates a [`ControlFlowGraph`] for one scope
/// (module, function, class, or synthesized generator body).
struct CfgBuilder<'a> {
    ast: &'a mut AST,
    cfg: ControlFlowGraph,
    current: BlockId,
    loop_exits: Vec<LoopFrame>,
    continue_guards: Vec<BlockId>,
}

/// Builds the control-flow graph for an entire module.
///
/// ## Errors
///
/// Returns [`CfgError::BreakOutsideLoop`] or [`CfgError::ContinueOutsideLoop`]
/// if the module contains a `break`/`continue` with no enclosing loop.
pub fn build_module_cfg(ast: &mut AST, module_id: NodeID) -> Result<ControlFlowGraph, CfgError> {
    let statements = match ast.get_as::<Module>(module_id) {
        Ok(module) => module.statements.clone(),
        Err(_) => return Ok(ControlFlowGraph::new("<module>")),
    };

    let mut builder = CfgBuilder::new(ast, "<module>");
    builder.visit_block(&statements)?;
    builder.finish()
}

impl<'a> CfgBuilder<'a> {
    fn new(ast: &'a mut AST, name: impl Into<String>) -> Self {
        let cfg = ControlFlowGraph::new(name);
        let current = cfg.start;
        Self { ast, cfg, current, loop_exits: Vec::new(), continue_guards: Vec::new() }
    }

    fn finish(mut self) -> Result<ControlFlowGraph, CfgError> {
        if !self.cfg.final_blocks.contains(&self.current) {
            self.cfg.final_blocks.push(self.current);
        }
        self.cfg.eliminate_empty_blocks();
        Ok(self.cfg)
    }

    fn new_block(&mut self) -> BlockId { self.cfg.new_block() }

    fn link(&mut self, from: BlockId, to: BlockId, guard: Guard) {
        self.cfg.add_edge(from, to, guard);
    }

    /// Appends a statement to the current block without affecting control flow.
    fn append(&mut self, stmt_id: NodeID) { self.cfg.add_stmt(self.current, stmt_id); }

    fn mark_terminated(&mut self) {
        if let Some(block) = self.cfg.get_block_mut(self.current) {
            block.has_terminator = true;
        }
    }

    fn mark_final(&mut self) {
        if !self.cfg.final_blocks.contains(&self.current) {
            self.cfg.final_blocks.push(self.current);
        }
    }

    fn terminated(&self, id: BlockId) -> bool {
        self.cfg.get_block(id).is_some_and(|b| b.has_terminator)
    }

    fn visit_block(&mut self, stmts: &[NodeID]) -> Result<(), CfgError> {
        for &stmt_id in stmts {
            self.visit_stmt(stmt_id)?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    fn visit_stmt(&mut self, stmt_id: NodeID) -> Result<(), CfgError> {
        let Some(node) = self.ast.get_node(stmt_id) else { return Ok(()) };
        let span = node.span;

        if let Ok(stmt) = self.ast.get_as::<ReturnStmt>(stmt_id).cloned() {
            if let Some(value) = stmt.value
                && let Ok(ternary) = self.ast.get_as::<TernaryExpr>(value).cloned()
            {
                let if_id = self.lower_conditional_return(&ternary, span);
                return self.visit_stmt(if_id);
            }

            match stmt.value.map(|v| (v, self.desugar_comprehension_value(v))) {
                Some((original, value)) if original != value => {
                    let ret = ReturnStmt::new(Some(value), NodeID::placeholder(), span);
                    let new_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::ReturnStmt(ret), span);
                    self.append(new_id);
                }
                Some((original, _)) => {
                    self.fold_nested_calls(original);
                    self.append(stmt_id);
                }
                None => self.append(stmt_id),
            }
            self.mark_terminated();
            self.mark_final();
            self.current = self.new_block();
            return Ok(());
        }

        if self.ast.get_as::<BreakStmt>(stmt_id).is_ok() {
            let Some(frame) = self.loop_exits.last().copied() else {
                return Err(CfgError::BreakOutsideLoop { span });
            };
            self.append(stmt_id);
            self.mark_terminated();
            self.link(self.current, frame.exit, Guard::None);
            self.current = self.new_block();
            return Ok(());
        }

        if self.ast.get_as::<ContinueStmt>(stmt_id).is_ok() {
            let Some(&guard) = self.continue_guards.last() else {
                return Err(CfgError::ContinueOutsideLoop { span });
            };
            self.append(stmt_id);
            self.mark_terminated();
            self.link(self.current, guard, Guard::None);
            self.current = self.new_block();
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<IfStmt>(stmt_id).cloned() {
            self.visit_if(stmt_id, &stmt);
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<WhileStmt>(stmt_id).cloned() {
            self.visit_while(stmt_id, &stmt)?;
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<ForStmt>(stmt_id).cloned() {
            self.visit_for(stmt_id, stmt.target, stmt.iter, &stmt.body, stmt.else_body.as_deref())?;
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<AsyncForStmt>(stmt_id).cloned() {
            self.visit_for(stmt_id, stmt.target, stmt.iter, &stmt.body, stmt.else_body.as_deref())?;
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<AssignmentStmt>(stmt_id).cloned() {
            if let Ok(lambda) = self.ast.get_as::<LambdaExpr>(stmt.value).cloned() {
                self.lift_lambda(stmt.target, &lambda, span);
                return Ok(());
            }

            let value = self.desugar_comprehension_value(stmt.value);
            if value == stmt.value {
                self.fold_nested_calls(stmt.value);
                self.append(stmt_id);
            } else {
                let assign = AssignmentStmt::new(stmt.target, value, NodeID::placeholder(), span);
                let new_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::AssignmentStmt(assign), span);
                self.append(new_id);
            }
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<AugmentedAssignmentStmt>(stmt_id).cloned() {
            let value = self.desugar_comprehension_value(stmt.value);
            if value == stmt.value {
                self.fold_nested_calls(stmt.value);
                self.append(stmt_id);
            } else {
                let assign =
                    AugmentedAssignmentStmt::new(stmt.target, stmt.operator, value, NodeID::placeholder(), span);
                let new_id =
                    self.ast.alloc_node(NodeKind::Statement, AnyNode::AugmentedAssignmentStmt(assign), span);
                self.append(new_id);
            }
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<ExpressionStmt>(stmt_id).cloned() {
            let value = self.desugar_comprehension_value(stmt.expression);
            if value == stmt.expression {
                self.fold_nested_calls(stmt.expression);
                self.append(stmt_id);
            } else {
                let wrapped = ExpressionStmt::new(value, NodeID::placeholder(), span);
                let new_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::ExpressionStmt(wrapped), span);
                self.append(new_id);
            }
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<RaiseStmt>(stmt_id).cloned() {
            if let Some(exc) = stmt.exception {
                self.fold_nested_calls(exc);
            }
            self.append(stmt_id);
            self.mark_terminated();
            self.mark_final();
            self.current = self.new_block();
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<AssertStmt>(stmt_id).cloned() {
            self.append(stmt_id);
            self.mark_final();
            let ok = self.new_block();
            self.link(self.current, ok, Guard::Expr(stmt.condition));
            self.current = ok;
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<FunctionDecl>(stmt_id).cloned() {
            self.append(stmt_id);
            self.build_nested_function(&stmt.name, &stmt.parameters, &stmt.body, span);
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<AsyncFunctionDecl>(stmt_id).cloned() {
            self.append(stmt_id);
            self.build_nested_function(&stmt.name, &stmt.parameters, &stmt.body, span);
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<ClassDecl>(stmt_id).cloned() {
            self.append(stmt_id);
            let mut class_builder = CfgBuilder::new(self.ast, stmt.name.clone());
            class_builder.visit_block(&stmt.body)?;
            let class_cfg = class_builder.finish()?;
            let _ = self.cfg.class_cfgs.insert(stmt.name, class_cfg);
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<TryStmt>(stmt_id).cloned() {
            self.visit_try(&stmt)?;
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<WithStmt>(stmt_id).cloned() {
            self.append(stmt_id);
            self.visit_block(&stmt.body)?;
            return Ok(());
        }

        if let Ok(stmt) = self.ast.get_as::<AsyncWithStmt>(stmt_id).cloned() {
            self.append(stmt_id);
            self.visit_block(&stmt.body)?;
            return Ok(());
        }

        // Import, ImportFrom, Pass, Global, Nonlocal, Delete, and anything
        // else: linear, no control-flow effect of its own.
        if node.kind == NodeKind::Statement {
            self.append(stmt_id);
        } else {
            log::warn!("cfg_builder: unsupported statement node encountered at {span:?}");
            self.append(stmt_id);
        }

        Ok(())
    }

    /// Lowers `return value if condition else else_value` to
    /// `if condition: return value else: return else_value`, recursing when
    /// `else_value` is itself a conditional expression.
    fn lower_conditional_return(&mut self, ternary: &TernaryExpr, span: Span) -> NodeID {
        let then_body = vec![self.wrap_return(ternary.value, span)];

        let else_body = if let Ok(nested) = self.ast.get_as::<TernaryExpr>(ternary.else_value).cloned() {
            vec![self.lower_conditional_return(&nested, span)]
        } else {
            vec![self.wrap_return(ternary.else_value, span)]
        };

        let if_stmt =
            IfStmt::new(ternary.condition, then_body, Vec::new(), Some(else_body), NodeID::placeholder(), span);
        self.ast.alloc_node(NodeKind::Statement, AnyNode::IfStmt(if_stmt), span)
    }

    fn wrap_return(&mut self, value: NodeID, span: Span) -> NodeID {
        let ret = ReturnStmt::new(Some(value), NodeID::placeholder(), span);
        self.ast.alloc_node(NodeKind::Statement, AnyNode::ReturnStmt(ret), span)
    }

    // -- if / elif / else ---------------------------------------------------

    fn visit_if(&mut self, stmt_id: NodeID, stmt: &IfStmt) {
        let entry = self.current;
        self.append(stmt_id);
        let after = self.new_block();

        let mut branch_entry = entry;
        let mut condition = stmt.condition;
        let mut body: &[NodeID] = &stmt.body;

        loop {
            self.visit_if_arm(branch_entry, condition, body, after);
            let next = self.false_continuation(branch_entry);

            if let Some((next_cond, next_body)) = self.next_elif(stmt, condition) {
                branch_entry = next;
                condition = next_cond;
                body = next_body;
                continue;
            }

            self.current = next;
            if let Some(else_body) = &stmt.else_body {
                let _ = self.visit_block(else_body);
            }
            if !self.terminated(self.current) {
                self.link(self.current, after, Guard::None);
            }
            break;
        }

        self.current = after;
    }

    /// Finds the elif branch that structurally follows `condition`, if any.
    /// `elif_branches` is a flat list in source order, so we look the
    /// current condition up and take the next entry.
    fn next_elif<'s>(&self, stmt: &'s IfStmt, condition: NodeID) -> Option<(NodeID, &'s [NodeID])> {
        if condition == stmt.condition {
            return stmt.elif_branches.first().map(|(c, b)| (*c, b.as_slice()));
        }
        let idx = stmt.elif_branches.iter().position(|(c, _)| *c == condition)?;
        stmt.elif_branches.get(idx + 1).map(|(c, b)| (*c, b.as_slice()))
    }

    /// Visits one `if`/`elif` arm's body, wiring its guarded entry off
    /// `branch_entry` and its fallthrough into `after`.
    fn visit_if_arm(&mut self, branch_entry: BlockId, condition: NodeID, body: &[NodeID], after: BlockId) {
        let arm = self.new_block();
        self.link(branch_entry, arm, Guard::Expr(condition));
        self.current = arm;
        let _ = self.visit_block(body);
        if !self.terminated(self.current) {
            self.link(self.current, after, Guard::None);
        }
    }

    /// Allocates the block reached when `branch_entry`'s guard is false.
    fn false_continuation(&mut self, branch_entry: BlockId) -> BlockId {
        let next = self.new_block();
        self.link(branch_entry, next, Guard::None);
        next
    }

    // -- while / for ----------------------------------------------------------

    /// Reuses the current block as the loop guard if it is still empty and
    /// unterminated, otherwise opens a fresh guard block.
    fn enter_loop_guard(&mut self) -> BlockId {
        let reuse = self.current != self.cfg.start
            && self.cfg.get_block(self.current).is_some_and(|b| b.statements.is_empty() && !b.has_terminator);

        if reuse {
            self.current
        } else {
            let guard = self.new_block();
            self.link(self.current, guard, Guard::None);
            guard
        }
    }

    fn visit_while(&mut self, stmt_id: NodeID, stmt: &WhileStmt) -> Result<(), CfgError> {
        let guard = self.enter_loop_guard();
        self.current = guard;
        self.append(stmt_id);

        let body = self.new_block();
        let after = self.new_block();

        self.link(guard, body, Guard::Expr(stmt.test));
        self.link(guard, after, Guard::None);

        self.current = body;
        self.loop_exits.push(LoopFrame { guard, exit: after });
        self.continue_guards.push(guard);
        self.visit_block(&stmt.body)?;
        self.continue_guards.pop();
        self.loop_exits.pop();

        if !self.terminated(self.current) {
            self.link(self.current, guard, Guard::None);
        }

        self.current = after;
        if let Some(else_body) = &stmt.else_body {
            self.visit_block(else_body)?;
        }

        Ok(())
    }

    fn visit_for(
        &mut self,
        stmt_id: NodeID,
        target: NodeID,
        iter: NodeID,
        body: &[NodeID],
        else_body: Option<&[NodeID]>,
    ) -> Result<(), CfgError> {
        if self.is_comprehension(iter) {
            let span = self.ast.get_node(iter).map_or(Span::new(0, 0), |n| n.span);
            let tmp = self.hoist_comprehension(iter);
            let tmp_ref = self.fresh_variable_ref(&tmp, span);

            let mut new_for = ForStmt::new(NodeID::placeholder(), target, tmp_ref, body.to_vec(), span);
            if let Some(else_body) = else_body {
                new_for = new_for.with_else_body(else_body.to_vec());
            }
            let new_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::ForStmt(new_for), span);
            return self.visit_stmt(new_id);
        }

        let guard = self.enter_loop_guard();
        self.current = guard;
        self.append(stmt_id);

        let body_entry = self.new_block();
        let after = self.new_block();

        self.link(guard, body_entry, Guard::Sentinel("has_next"));
        self.link(guard, after, Guard::None);

        self.current = body_entry;
        self.loop_exits.push(LoopFrame { guard, exit: after });
        self.continue_guards.push(guard);
        self.visit_block(body)?;
        self.continue_guards.pop();
        self.loop_exits.pop();

        if !self.terminated(self.current) {
            self.link(self.current, guard, Guard::None);
        }

        self.current = after;
        if let Some(else_body) = else_body {
            self.visit_block(else_body)?;
        }

        Ok(())
    }

    // -- try / except / else / finally ----------------------------------------

    fn visit_try(&mut self, stmt: &TryStmt) -> Result<(), CfgError> {
        let guard = self.current;
        self.sentinel(guard, "try");

        self.visit_block(&stmt.body)?;
        let try_exit = self.current;

        let after_try = self.new_block();
        self.sentinel(after_try, "handle errors");
        if !self.terminated(try_exit) {
            self.link(try_exit, after_try, Guard::None);
        }

        for &handler_id in &stmt.handlers {
            if let Ok(handler) = self.ast.get_as::<ExceptHandler>(handler_id).cloned() {
                let handler_entry = self.new_block();
                let handler_guard = handler.exception_type.map_or(Guard::Sentinel("Error"), Guard::Expr);
                self.link(after_try, handler_entry, handler_guard);

                self.current = handler_entry;
                self.visit_block(&handler.body)?;
                let handler_exit = self.current;
                self.sentinel(handler_exit, "end except");
                if !self.terminated(handler_exit) {
                    self.link(handler_exit, after_try, Guard::None);
                }
            }
        }

        if let Some(else_body) = &stmt.else_body {
            let else_entry = self.new_block();
            self.link(after_try, else_entry, Guard::Sentinel("No Error"));

            self.current = else_entry;
            self.visit_block(else_body)?;
            let else_exit = self.current;
            self.sentinel(else_exit, "end no error");
            if !self.terminated(else_exit) {
                self.link(else_exit, after_try, Guard::None);
            }
        }

        let after = self.new_block();
        if let Some(finally_body) = &stmt.finally_body {
            self.link(after_try, after, Guard::Sentinel("Finally"));
            self.current = after;
            self.visit_block(finally_body)?;
        } else {
            self.link(after_try, after, Guard::None);
            self.current = after;
        }

        Ok(())
    }

    /// Marks `block` as carrying a sentinel statement so it survives
    /// empty-block elimination even if no real statement lands in it.
    fn sentinel(&mut self, block: BlockId, label: &'static str) {
        if self.cfg.get_block(block).is_some_and(|b| b.statements.is_empty()) {
            let span = Span::new(0, 0);
            let var = VariableExpr::new(format!("<{label}>"), NodeID::placeholder(), span);
            let id = self.ast.alloc_node(NodeKind::Expression, AnyNode::VariableExpr(var), span);
            let stmt = ExpressionStmt::new(id, NodeID::placeholder(), span);
            let stmt_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::ExpressionStmt(stmt), span);
            self.cfg.add_stmt(block, stmt_id);
        }
    }

    // -- nested scopes ---------------------------------------------------------

    fn build_nested_function(&mut self, name: &str, parameters: &[NodeID], body: &[NodeID], span: Span) {
        let parameter_names = self.parameter_names(parameters);
        let mut func_builder = CfgBuilder::new(self.ast, name);
        if func_builder.visit_block(body).is_err() {
            log::warn!("cfg_builder: error building nested function '{name}' at {span:?}");
            return;
        }
        let Ok(mut func_cfg) = func_builder.finish() else { return };

        if let Some(block) = func_cfg.get_block_mut(func_cfg.start) {
            block.kind = BlockKind::Func { name: name.to_string(), parameter_names };
        }

        let params = parameters.iter().map(|&p| (self.param_name(p), Some(p))).collect();
        let _ = self.cfg.func_cfgs.insert(name.to_string(), (params, func_cfg));
    }

    /// Lifts `target = lambda params: body` to a synthesized function
    /// definition named after `target` (when it is a plain variable; an
    /// assignment to anything else falls back to a generated name).
    fn lift_lambda(&mut self, target: NodeID, lambda: &LambdaExpr, span: Span) {
        let name = self
            .ast
            .get_as::<VariableExpr>(target)
            .map(|v| v.name.clone())
            .unwrap_or_else(|_| fresh_generator_name("lambda"));

        let ret_id = self.wrap_return(lambda.body, span);
        let func = FunctionDecl::new(name.clone(), lambda.parameters.clone(), vec![ret_id], NodeID::placeholder(), span);
        let func_id = self.ast.alloc_node(NodeKind::Declaration, AnyNode::FunctionDecl(func), span);
        self.append(func_id);
        self.build_nested_function(&name, &lambda.parameters, &[ret_id], span);
    }

    fn param_name(&self, param_id: NodeID) -> String {
        self.ast.get_as::<ParameterIdent>(param_id).map(|p| p.name.clone()).unwrap_or_default()
    }

    fn parameter_names(&self, parameters: &[NodeID]) -> Vec<String> {
        parameters.iter().map(|&p| self.param_name(p)).collect()
    }

    // -- expression desugaring --------------------------------------------------

    /// Folds calls nested inside `expr` into the current block, recording
    /// each call target's name on the owning block's `calls` list.
    fn fold_nested_calls(&mut self, expr: NodeID) {
        if let Ok(call) = self.ast.get_as::<CallExpr>(expr).cloned() {
            if let Some(callee) = self.callee_name(call.func)
                && let Some(block) = self.cfg.get_block_mut(self.current)
            {
                block.calls.push(callee);
            }
            for &arg in &call.args {
                self.fold_nested_calls(arg);
            }
            return;
        }

        let Some(node) = self.ast.get_node(expr) else { return };
        for child in node.data.children() {
            self.fold_nested_calls(child);
        }
    }

    fn callee_name(&self, func: NodeID) -> Option<String> {
        if let Ok(var) = self.ast.get_as::<VariableExpr>(func) {
            return Some(var.name.clone());
        }
        if let Ok(attr) = self.ast.get_as::<AttributeExpr>(func) {
            return Some(attr.name.clone());
        }
        None
    }

    /// If `expr` is itself a comprehension or generator expression, hoists
    /// it ahead of the current statement and returns a reference to the
    /// temporary holding its result. Otherwise returns `expr` unchanged.
    ///
    /// Only catches the comprehension at the expression's own root — an
    /// assignment/return/expression-statement's direct value — which covers
    /// the common `x = [... for ...]`/`return (... for ...)` shapes. A
    /// comprehension buried inside a larger expression (e.g. as one operand
    /// of a binary op) is left for the next analysis pass to desugar once it
    /// walks that operand as its own statement-level value.
    fn desugar_comprehension_value(&mut self, expr: NodeID) -> NodeID {
        if !self.is_comprehension(expr) {
            return expr;
        }
        let span = self.ast.get_node(expr).map_or(Span::new(0, 0), |n| n.span);
        let tmp = self.hoist_comprehension(expr);
        self.fresh_variable_ref(&tmp, span)
    }

    fn is_comprehension(&self, expr: NodeID) -> bool {
        self.ast.get_as::<ListComprehensionExpr>(expr).is_ok()
            || self.ast.get_as::<SetComprehensionExpr>(expr).is_ok()
            || self.ast.get_as::<DictComprehensionExpr>(expr).is_ok()
            || self.ast.get_as::<GeneratorExpr>(expr).is_ok()
    }

    /// Lowers a comprehension into `tmp = []`/`tmp = {}` followed by a
    /// synthesized `for` statement tree appended to the current block
    /// (or, for a generator expression, a synthesized generator function),
    /// returning the name of the temporary holding the result.
    fn hoist_comprehension(&mut self, expr: NodeID) -> String {
        let span = self.ast.get_node(expr).map_or(Span::new(0, 0), |n| n.span);

        if let Ok(gen) = self.ast.get_as::<GeneratorExpr>(expr).cloned() {
            return self.hoist_generator(&gen, span);
        }

        if let Ok(comp) = self.ast.get_as::<DictComprehensionExpr>(expr).cloned() {
            let tmp = fresh_temp_name();
            self.emit_assign_empty_literal(&tmp, span, true);
            let append = self.build_dict_append(&tmp, comp.key, comp.value, span);
            self.emit_generator_chain(&comp.generators, append, span);
            return tmp;
        }

        let (element, generators) = if let Ok(comp) = self.ast.get_as::<ListComprehensionExpr>(expr).cloned()
        {
            (comp.element, comp.generators)
        } else if let Ok(comp) = self.ast.get_as::<SetComprehensionExpr>(expr).cloned() {
            (comp.element, comp.generators)
        } else {
            return fresh_temp_name();
        };

        let tmp = fresh_temp_name();
        self.emit_assign_empty_literal(&tmp, span, false);
        let append = self.build_append_call(&tmp, element, span);
        self.emit_generator_chain(&generators, append, span);
        tmp
    }

    fn hoist_generator(&mut self, gen: &GeneratorExpr, span: Span) -> String {
        let gen_name = fresh_generator_name("expr");
        let yield_expr = YieldExpr::new(Some(gen.element), NodeID::placeholder(), span);
        let yield_id = self.ast.alloc_node(NodeKind::Expression, AnyNode::YieldExpr(yield_expr), span);
        let yield_stmt = ExpressionStmt::new(yield_id, NodeID::placeholder(), span);
        let yield_stmt_id =
            self.ast.alloc_node(NodeKind::Statement, AnyNode::ExpressionStmt(yield_stmt), span);

        let body = self.nest_generators(&gen.generators, vec![yield_stmt_id], span);

        self.build_nested_function(&gen_name, &[], &body, span);
        let func = FunctionDecl::new(gen_name.clone(), Vec::new(), body, NodeID::placeholder(), span);
        let func_id = self.ast.alloc_node(NodeKind::Declaration, AnyNode::FunctionDecl(func), span);
        self.append(func_id);

        gen_name
    }

    /// Wraps `innermost` in nested `for`/`if` statement trees, one level per
    /// generator clause, outermost first — the literal shape a `for`-clause
    /// chain in a comprehension desugars to.
    fn nest_generators(
        &mut self,
        generators: &[ComprehensionFor],
        innermost: Vec<NodeID>,
        span: Span,
    ) -> Vec<NodeID> {
        let mut body = innermost;

        for gen in generators.iter().rev() {
            let guarded = if gen.ifs.is_empty() {
                body
            } else {
                let condition = self.conjoin(&gen.ifs, span);
                let if_stmt = IfStmt::new(condition, body, Vec::new(), None, NodeID::placeholder(), span);
                let if_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::IfStmt(if_stmt), span);
                vec![if_id]
            };

            let for_stmt = ForStmt::new(NodeID::placeholder(), gen.target, gen.iter, guarded, span);
            let for_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::ForStmt(for_stmt), span);
            body = vec![for_id];
        }

        body
    }

    fn emit_generator_chain(&mut self, generators: &[ComprehensionFor], innermost: Vec<NodeID>, span: Span) {
        let tree = self.nest_generators(generators, innermost, span);
        for stmt_id in tree {
            let _ = self.visit_stmt(stmt_id);
        }
    }

    /// Combines multiple `if`-clauses on one generator into a single
    /// `and`-chained condition, synthesizing real `BinaryOpExpr` nodes.
    fn conjoin(&mut self, conditions: &[NodeID], span: Span) -> NodeID {
        let mut iter = conditions.iter().copied();
        let Some(mut acc) = iter.next() else {
            let lit = LiteralExpr::new(LiteralValue::Bool(true), "True".to_string(), NodeID::placeholder(), span);
            return self.ast.alloc_node(NodeKind::Expression, AnyNode::LiteralExpr(lit), span);
        };

        for next in iter {
            let op = BinaryOpExpr::new(BinaryOpKind::And, acc, next, NodeID::placeholder(), span);
            acc = self.ast.alloc_node(NodeKind::Expression, AnyNode::BinaryOpExpr(op), span);
        }

        acc
    }

    fn emit_assign_empty_literal(&mut self, name: &str, span: Span, as_dict: bool) {
        let target = self.fresh_variable_ref(name, span);
        let value = if as_dict {
            let dict = typhon_ast::nodes::DictExpr::new(Vec::new(), NodeID::placeholder(), span);
            self.ast.alloc_node(NodeKind::Expression, AnyNode::DictExpr(dict), span)
        } else {
            let list = ListExpr::new(Vec::new(), NodeID::placeholder(), span);
            self.ast.alloc_node(NodeKind::Expression, AnyNode::ListExpr(list), span)
        };
        let assign = AssignmentStmt::new(target, value, NodeID::placeholder(), span);
        let stmt_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::AssignmentStmt(assign), span);
        self.append(stmt_id);
    }

    fn build_append_call(&mut self, tmp: &str, element: NodeID, span: Span) -> Vec<NodeID> {
        let target = self.fresh_variable_ref(tmp, span);
        let attr = AttributeExpr::new(target, "append".to_string(), NodeID::placeholder(), span);
        let attr_id = self.ast.alloc_node(NodeKind::Expression, AnyNode::AttributeExpr(attr), span);
        let arg = ArgumentExpr::new(String::new(), element, NodeID::placeholder(), span);
        let arg_id = self.ast.alloc_node(NodeKind::Expression, AnyNode::ArgumentExpr(arg), span);
        let call = CallExpr::new(attr_id, vec![arg_id], Vec::new(), NodeID::placeholder(), span);
        let call_id = self.ast.alloc_node(NodeKind::Expression, AnyNode::CallExpr(call), span);
        let stmt = ExpressionStmt::new(call_id, NodeID::placeholder(), span);
        let stmt_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::ExpressionStmt(stmt), span);
        vec![stmt_id]
    }

    fn build_dict_append(&mut self, tmp: &str, key: NodeID, value: NodeID, span: Span) -> Vec<NodeID> {
        let target = self.fresh_variable_ref(tmp, span);
        let subscript = SubscriptionExpr::new(target, key, NodeID::placeholder(), span);
        let subscript_id = self.ast.alloc_node(NodeKind::Expression, AnyNode::SubscriptionExpr(subscript), span);
        let assign = AssignmentStmt::new(subscript_id, value, NodeID::placeholder(), span);
        let stmt_id = self.ast.alloc_node(NodeKind::Statement, AnyNode::AssignmentStmt(assign), span);
        vec![stmt_id]
    }

    fn fresh_variable_ref(&mut self, name: &str, span: Span) -> NodeID {
        let var = VariableExpr::new(name.to_string(), NodeID::placeholder(), span);
        self.ast.alloc_node(NodeKind::Expression, AnyNode::VariableExpr(var), span)
    }
}
