//! End-to-end tests for control-flow graph construction.

use std::sync::Arc;

use typhon_analyzer::analysis::build_module_cfg;
use typhon_analyzer::error::CfgError;
use typhon_parser::parser::Parser;
use typhon_source::types::SourceManager;

/// Parses `source` and builds the module's control-flow graph.
fn build(source: &str) -> typhon_analyzer::ControlFlowGraph {
    let mut source_manager = SourceManager::new();
    let file_id = source_manager.add_file("test.ty".to_string(), source.to_string());
    let mut parser = Parser::new(source, file_id, Arc::new(source_manager));
    let module_id = parser.parse_module().expect("failed to parse module");

    build_module_cfg(parser.ast_mut(), module_id).expect("failed to build cfg")
}

fn try_build(source: &str) -> Result<typhon_analyzer::ControlFlowGraph, CfgError> {
    let mut source_manager = SourceManager::new();
    let file_id = source_manager.add_file("test.ty".to_string(), source.to_string());
    let mut parser = Parser::new(source, file_id, Arc::new(source_manager));
    let module_id = parser.parse_module().expect("failed to parse module");

    build_module_cfg(parser.ast_mut(), module_id)
}

#[test]
fn linear_statements_form_a_single_block_chain() {
    let cfg = build("x = 1\ny = 2\nz = 3\n");

    assert!(cfg.block_count() >= 1);
    let entry = cfg.entry_block();
    assert_eq!(entry.statements.len(), 3);
}

#[test]
fn if_statement_creates_a_guarded_true_branch() {
    let cfg = build("if x > 0:\n    y = 1\n");

    let has_guarded_edge = cfg.edges.values().any(|g| !g.is_none());
    assert!(has_guarded_edge, "the true branch of an if must carry a guard");
}

#[test]
fn if_else_merges_into_one_block_after() {
    let cfg = build("if x:\n    y = 1\nelse:\n    y = 2\nz = 3\n");

    let final_stmt_blocks: Vec<_> =
        cfg.blocks().filter(|b| b.statements.iter().count() > 0).collect();
    assert!(!final_stmt_blocks.is_empty());
}

#[test]
fn elif_chain_branches_off_the_prior_false_continuation() {
    let cfg = build("if a:\n    x = 1\nelif b:\n    x = 2\nelif c:\n    x = 3\nelse:\n    x = 4\n");

    // Each condition (a, b, c) guards exactly one edge.
    let guarded_edges = cfg.edges.values().filter(|g| !g.is_none()).count();
    assert!(guarded_edges >= 3, "expected at least one guarded edge per condition");
}

#[test]
fn while_loop_guard_is_reentered_on_fallthrough() {
    let cfg = build("while x > 0:\n    x = x - 1\n");

    assert!(cfg.block_count() >= 2);
    let has_guarded_edge = cfg.edges.values().any(|g| !g.is_none());
    assert!(has_guarded_edge);
}

#[test]
fn for_loop_has_has_next_sentinel_guard() {
    let cfg = build("for item in items:\n    process(item)\n");

    let has_sentinel = cfg.edges.values().any(|g| format!("{g}") == "has_next");
    assert!(has_sentinel, "for-loop entry should be guarded by the has_next sentinel");
}

#[test]
fn break_jumps_directly_to_loop_exit() {
    let cfg = build("while True:\n    if done:\n        break\n    x = 1\n");

    assert!(cfg.block_count() >= 3);
}

#[test]
fn continue_jumps_back_to_the_loop_guard() {
    let cfg = build("for x in xs:\n    if skip(x):\n        continue\n    use(x)\n");

    assert!(cfg.block_count() >= 3);
}

#[test]
fn break_outside_loop_is_an_error() {
    let err = try_build("break\n").expect_err("break outside a loop must fail");
    assert!(matches!(err, CfgError::BreakOutsideLoop { .. }));
}

#[test]
fn continue_outside_loop_is_an_error() {
    let err = try_build("continue\n").expect_err("continue outside a loop must fail");
    assert!(matches!(err, CfgError::ContinueOutsideLoop { .. }));
}

#[test]
fn return_statement_terminates_its_block_and_is_final() {
    let cfg = build("def f():\n    return 1\n    x = 2\n");

    let (_, func_cfg) = cfg.func_cfgs.get("f").expect("function 'f' should have a nested cfg");
    assert!(!func_cfg.final_blocks.is_empty());
}

#[test]
fn raise_terminates_its_block() {
    let cfg = build("def f():\n    raise ValueError('bad')\n    x = 2\n");

    let (_, func_cfg) = cfg.func_cfgs.get("f").expect("function 'f' should have a nested cfg");
    assert!(!func_cfg.final_blocks.is_empty());
}

#[test]
fn assert_creates_a_guarded_continuation() {
    let cfg = build("assert x > 0\ny = 1\n");

    let has_guarded_edge = cfg.edges.values().any(|g| !g.is_none());
    assert!(has_guarded_edge);
}

#[test]
fn function_def_creates_a_nested_cfg_with_its_own_blocks() {
    let cfg = build("def add(a, b):\n    return a + b\n");

    let (params, func_cfg) = cfg.func_cfgs.get("add").expect("function 'add' should exist");
    assert_eq!(params.len(), 2);
    assert!(func_cfg.block_count() >= 1);
}

#[test]
fn class_def_creates_a_nested_cfg_for_its_body() {
    let cfg = build("class Counter:\n    def bump(self):\n        return 1\n");

    let class_cfg = cfg.class_cfgs.get("Counter").expect("class 'Counter' should exist");
    assert!(class_cfg.func_cfgs.contains_key("bump"));
}

#[test]
fn try_except_wires_a_handler_edge_guarded_by_the_exception_type() {
    let cfg = build("try:\n    risky()\nexcept ValueError:\n    handle()\n");

    // The handler's entry edge is guarded by its exception-type expression,
    // not a bare sentinel, so its display is neither "<always>" nor a
    // literal sentinel label.
    let has_typed_guard =
        cfg.edges.values().any(|g| !g.is_none() && format!("{g}") != "Error" && format!("{g}") != "Finally");
    assert!(has_typed_guard, "the handler entry edge should be guarded by the exception type expression");
}

#[test]
fn try_except_with_bare_except_falls_back_to_the_error_sentinel() {
    let cfg = build("try:\n    risky()\nexcept:\n    handle()\n");

    let has_error_sentinel = cfg.edges.values().any(|g| format!("{g}") == "Error");
    assert!(has_error_sentinel, "a bare except with no exception type should guard on the Error sentinel");
}

#[test]
fn try_finally_runs_after_every_path() {
    let cfg = build("try:\n    risky()\nfinally:\n    cleanup()\n");

    assert!(cfg.block_count() >= 3);
}

#[test]
fn list_comprehension_desugars_into_a_hoisted_loop_and_append_calls() {
    let cfg = build("squares = [x * x for x in range(10)]\n");

    let entry = cfg.entry_block();
    // The comprehension hoists tmp = [] before the original assignment.
    assert!(entry.statements.len() >= 1);
    assert!(cfg.block_count() > 1, "the desugared for-loop should add blocks");
}

#[test]
fn comprehension_if_clause_becomes_a_real_guard_on_the_desugared_loop() {
    let cfg = build("evens = [x for x in range(10) if x % 2 == 0]\n");

    let has_guarded_edge = cfg.edges.values().any(|g| !g.is_none());
    assert!(has_guarded_edge, "the comprehension's if-clause must survive as an edge guard");
}

#[test]
fn generator_expression_lowers_to_a_synthesized_generator_function() {
    let cfg = build("gen = (x for x in range(5))\n");

    assert!(
        cfg.func_cfgs.keys().any(|name| name.starts_with("__cfg_gen_")),
        "a generator expression should lower to a synthesized function"
    );
}

#[test]
fn nested_call_in_a_condition_is_recorded_on_its_block() {
    let cfg = build("if is_valid(x):\n    y = 1\n");

    let has_call = cfg.blocks().any(|b| b.calls.iter().any(|c| c == "is_valid"));
    assert!(has_call);
}

#[test]
fn empty_block_elimination_collapses_trivial_pass_through_blocks() {
    let cfg = build("if a:\n    pass\nx = 1\n");

    // `pass` is a real statement, so the then-arm should not vanish, but no
    // stray zero-statement block should remain reachable from it.
    let empty_non_start =
        cfg.blocks().filter(|b| b.statements.is_empty() && b.id != cfg.start).count();
    assert_eq!(empty_non_start, 0, "eliminate_empty_blocks should remove all empty non-start blocks");
}

#[test]
fn block_ids_are_unique_across_nested_function_cfgs() {
    let cfg = build("def f():\n    return 1\n\ndef g():\n    return 2\n");

    let (_, f_cfg) = cfg.func_cfgs.get("f").unwrap();
    let (_, g_cfg) = cfg.func_cfgs.get("g").unwrap();
    assert_ne!(f_cfg.start, g_cfg.start, "block ids are allocated from one process-wide counter");
}

#[test]
fn conditional_return_lowers_to_an_if_else_branch() {
    let cfg = build("def f(x):\n    return 1 if x else 2\n");

    let (_, func_cfg) = cfg.func_cfgs.get("f").expect("function 'f' should exist");
    assert_eq!(func_cfg.final_blocks.len(), 2, "each arm of the conditional return is its own final block");
}

#[test]
fn lambda_assigned_to_a_name_lifts_to_a_named_function() {
    let cfg = build("square = lambda x: x * x\n");

    let (params, _) = cfg.func_cfgs.get("square").expect("lambda should lift to fn 'square'");
    assert_eq!(params.len(), 1);
}
