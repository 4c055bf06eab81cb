//! Configuration flowing into the lexer and parser

use pyplus::util::config::{FrontendConfig, DEFAULT_MAX_NESTING_DEPTH};
use pyplus::{Frontend, Stmt};

const MIXED_INDENT: &str = "if x:\n\ty = 1\n        z = 2\n";

#[test]
fn test_tab_width_from_ron() {
    let config = FrontendConfig::from_ron_str("(tab_width: 8)").unwrap();
    assert_eq!(config.tab_width, 8);
    assert_eq!(config.max_nesting_depth, DEFAULT_MAX_NESTING_DEPTH);

    let program = Frontend::with_config(config).parse(MIXED_INDENT).unwrap();
    let Stmt::If { body, .. } = &program.body[0] else {
        panic!("Expected if statement, got {:?}", program.body[0]);
    };
    assert_eq!(body.len(), 2);
}

#[test]
fn test_default_tab_width_sees_deeper_indent() {
    let err = Frontend::new().parse(MIXED_INDENT).unwrap_err();
    assert_eq!(err.message(), "unexpected indent");
    assert_eq!(err.line(), 3);
}

#[test]
fn test_nesting_limit_from_config() {
    let frontend = Frontend::with_config(FrontendConfig {
        max_nesting_depth: 4,
        ..FrontendConfig::default()
    });
    assert_eq!(frontend.config().max_nesting_depth, 4);
    let err = frontend.parse("f(g(h(i(j(1)))))\n").unwrap_err();
    assert_eq!(err.message(), "maximum nesting depth exceeded");
    assert!(frontend.parse("f(1)\n").is_ok());
}
