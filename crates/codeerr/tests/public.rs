//! Public API behaviour against the global code center.
//!
//! Every test touching the global center runs `#[serial]` and resets the
//! app code to 0 first.

use std::io;

use codeerr::codes::{ERR_BASIC, ERR_DB, STATUS_OK};
use codeerr::{
    as_kind, format_err, is, is_code, new, new_ok, parse_code, set_app_code, unwrap_cause,
    with_code, with_code_options, with_message, with_stack, wrap, Error, Kind, Verb,
};
use rstest::{fixture, rstest};
use serial_test::serial;

const BASIC_MSG: &str = "basic error";

struct Errs {
    outer: Error,
    new_err: Error,
    new_fmt: Error,
    wrap_err: Error,
    wrap_fmt: Error,
    wrap_outer: Error,
    wrap_nil: Option<Error>,
    wrap_empty: Error,
    code_err: Error,
    code_option: Error,
    code_outer: Error,
    code_nil: Error,
    stack_err: Error,
}

fn foreign(message: &str) -> Error {
    Error::foreign(io::Error::other(message.to_string()))
}

#[fixture]
fn errs() -> Errs {
    set_app_code(0);
    new_ok(ERR_BASIC, BASIC_MSG);

    let outer = foreign("outer error");
    let new_err = new("new error");
    let nothing: Option<Error> = None;

    Errs {
        new_fmt: format_err!("new {}", "error"),
        wrap_err: wrap(new_err.clone(), "wrap error").unwrap(),
        wrap_fmt: codeerr::wrap!(new_err.clone(), "wrap {}", "error").unwrap(),
        wrap_outer: wrap(outer.clone(), "wrap error").unwrap(),
        wrap_nil: wrap(nothing, "wrap error"),
        wrap_empty: wrap(new_err.clone(), " ").unwrap(),
        code_err: with_code(new_err.clone(), ERR_BASIC),
        code_option: with_code_options(new_err.clone(), ERR_BASIC, [with_message("cover message")]),
        code_outer: with_code(outer.clone(), ERR_BASIC),
        code_nil: with_code(None, ERR_BASIC),
        stack_err: with_stack(foreign("stack error")),
        outer,
        new_err,
    }
}

#[rstest]
#[serial]
fn test_new(errs: Errs) {
    assert_eq!(errs.new_err.to_string(), "new error");
    assert_eq!(errs.new_fmt.to_string(), "new error");
    assert_eq!(errs.new_err.kind(), Kind::Fundamental);
    assert_eq!(errs.new_err.stacks().count(), 1);
}

#[rstest]
#[serial]
fn test_wrap(errs: Errs) {
    assert_eq!(errs.wrap_err.to_string(), "wrap error");
    assert_eq!(errs.wrap_fmt.to_string(), "wrap error");
    assert_eq!(errs.wrap_outer.to_string(), "wrap error");
    assert_eq!(errs.wrap_empty.to_string(), "new error");
    assert!(errs.wrap_empty.ptr_eq(&errs.new_err));
    assert!(errs.wrap_nil.is_none());
}

#[rstest]
#[case("")]
#[case(" ")]
#[case("\t\n  ")]
#[serial]
fn test_blank_wrap_is_identity(#[case] message: &str) {
    let chain = new("root");
    assert!(wrap(chain.clone(), message).unwrap().ptr_eq(&chain));

    let outer = foreign("outer");
    assert!(wrap(outer.clone(), message).unwrap().ptr_eq(&outer));
}

#[rstest]
#[serial]
fn test_with_code(errs: Errs) {
    assert_eq!(errs.code_err.to_string(), BASIC_MSG);
    assert_eq!(errs.code_option.to_string(), "cover message");
    assert_eq!(errs.code_outer.to_string(), BASIC_MSG);
    assert_eq!(errs.code_nil.to_string(), BASIC_MSG);

    assert_eq!(errs.code_err.kind(), Kind::WithCode);
    assert_eq!(errs.code_nil.kind(), Kind::WithStack);
    assert!(errs.code_nil.cause().unwrap().cause().is_none());
}

#[rstest]
#[serial]
fn test_unwrap(errs: Errs) {
    assert_eq!(unwrap_cause(&errs.new_err), Some(errs.new_err.clone()));

    assert_eq!(unwrap_cause(&errs.wrap_err), Some(errs.new_err.clone()));
    assert_eq!(unwrap_cause(&errs.wrap_outer), Some(errs.outer.clone()));

    assert_eq!(unwrap_cause(&errs.code_err), Some(errs.new_err.clone()));
    assert_eq!(unwrap_cause(&errs.code_outer), Some(errs.outer.clone()));
    assert_eq!(unwrap_cause(&errs.code_nil), None);

    let stacked_outer = with_stack(errs.outer.clone());
    assert_eq!(unwrap_cause(&stacked_outer), Some(errs.outer.clone()));
}

#[rstest]
#[serial]
fn test_is(errs: Errs) {
    assert!(is(&errs.new_err, &errs.new_err));
    assert!(is(&errs.wrap_err, &errs.new_err));
    assert!(is(&errs.code_err, &errs.new_err));
    assert!(is(&errs.wrap_outer, &errs.outer));

    assert!(!is(&errs.new_err, &errs.outer));
    assert!(!is(&errs.wrap_err, &errs.outer));
    assert!(!is(&errs.code_err, &errs.outer));
    assert!(!is(&errs.new_err, &new("new error")));
}

#[rstest]
#[serial]
fn test_as(errs: Errs) {
    let origin = as_kind(&errs.wrap_err, Kind::Fundamental);
    assert_eq!(origin, unwrap_cause(&errs.wrap_err));
    assert!(as_kind(&errs.wrap_err, Kind::WithCode).is_none());

    let wrapped_code = wrap(errs.code_err.clone(), "outer").unwrap();
    assert_eq!(as_kind(&wrapped_code, Kind::WithCode), Some(errs.code_err.clone()));
    assert_eq!(
        errs.wrap_outer.downcast_ref::<io::Error>().map(|e| e.to_string()),
        Some("outer error".to_string())
    );
}

#[rstest]
#[serial]
fn test_parse_code(errs: Errs) {
    let code = parse_code(&errs.code_err);
    assert_eq!(code.business_code, ERR_BASIC);
    assert_eq!(code.http_code, STATUS_OK);
    assert_eq!(code.message, BASIC_MSG);
    assert_eq!(code.cause(), Some(&errs.new_err));

    let code = parse_code(&wrap(errs.code_err.clone(), "wrap error").unwrap());
    assert_eq!(code.business_code, ERR_BASIC);
    assert_eq!(code.http_code, STATUS_OK);
    assert_eq!(code.message, "wrap error");
    assert_eq!(code.cause(), Some(&errs.new_err));
}

#[rstest]
#[serial]
fn test_parse_code_without_code(errs: Errs) {
    let code = parse_code(&errs.wrap_outer);
    assert_eq!(code.message, "wrap error");
    assert_eq!(code.http_code, STATUS_OK);
    assert_eq!(code.business_code, 0);
    assert!(code.cause().is_none());
}

#[rstest]
#[serial]
fn test_is_code(errs: Errs) {
    assert!(is_code(&errs.code_err, ERR_BASIC));
    assert!(!is_code(&errs.code_err, ERR_DB));
    assert!(!is_code(&errs.wrap_err, ERR_BASIC));
    assert!(is_code(&wrap(errs.code_err.clone(), "more").unwrap(), ERR_BASIC));
}

#[rstest]
#[serial]
fn test_is_code_tracks_live_offset(errs: Errs) {
    set_app_code(5);
    let coded = with_code(errs.new_err.clone(), 77);
    assert!(is_code(&coded, 77));

    set_app_code(6);
    assert!(!is_code(&coded, 77));
    set_app_code(0);
}

#[rstest]
#[serial]
fn test_set_service_code(_errs: Errs) {
    set_app_code(3);
    new_ok(2001, "ok");
    let err = with_code(None, 2001);
    assert_eq!(parse_code(&err).business_code, 32001);
    assert_eq!(parse_code(&err).message, "ok");
    set_app_code(0);
}

#[rstest]
#[serial]
fn test_with_stack(errs: Errs) {
    assert_eq!(errs.stack_err.to_string(), "stack error");
    assert_eq!(errs.stack_err.kind(), Kind::WithStack);
}

#[rstest]
#[serial]
fn test_one_stack_per_creation_point(errs: Errs) {
    assert_eq!(errs.wrap_err.stacks().count(), 1);
    assert_eq!(errs.wrap_outer.stacks().count(), 1);
    assert_eq!(errs.code_err.stacks().count(), 1);
    assert_eq!(errs.code_outer.stacks().count(), 1);
    assert_eq!(errs.code_nil.stacks().count(), 1);

    let twice = wrap(errs.wrap_outer.clone(), "again").unwrap();
    assert_eq!(twice.stacks().count(), 1);
    let coded = with_code(twice, ERR_BASIC);
    assert_eq!(coded.stacks().count(), 1);

    // Explicit re-anchoring is allowed.
    assert_eq!(with_stack(errs.new_err.clone()).stacks().count(), 2);
}

#[rstest]
#[serial]
fn test_formatting(errs: Errs) {
    assert_eq!(errs.wrap_err.format(Verb::Plain), "wrap error");
    assert_eq!(errs.wrap_err.format(Verb::Quoted), r#""wrap error""#);

    let detailed = errs.wrap_err.format(Verb::Detailed);
    assert!(detailed.starts_with("wrap error\nnew error"));

    let detailed = format!("{:#}", errs.code_outer);
    assert!(detailed.starts_with("basic error\nouter error"));
}

#[rstest]
#[serial]
fn test_source_chain(errs: Errs) {
    use std::error::Error as _;
    let source = errs.wrap_outer.source().unwrap();
    assert_eq!(source.to_string(), "outer error");
}
