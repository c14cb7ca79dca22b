//! Offset composition on the global center. Runs in its own process so the
//! registrations below do not collide with other test binaries.

use codeerr::codes::{ERR_BASIC, STATUS_INTERNAL_SERVER_ERROR};
use codeerr::{new_internal_error, parse_code, set_app_code, with_code};
use serial_test::serial;

#[test]
#[serial]
fn test_offset_per_app_code() {
    for (app, expected) in [(1, 10001), (2, 20002), (3, 30003), (4, 40004)] {
        set_app_code(app);
        new_internal_error(app, "basic error");

        let code = parse_code(&with_code(None, app));
        assert_eq!(code.business_code, expected);
        assert_eq!(code.http_code, STATUS_INTERNAL_SERVER_ERROR);
        assert_eq!(code.message, "basic error");
    }
}

#[test]
#[serial]
fn test_unregistered_code_keeps_composed_value() {
    set_app_code(7);
    let code = parse_code(&with_code(None, 4242));
    assert_eq!(code.business_code, 74242);
    assert_eq!(code.message, "");
}

#[test]
#[serial]
fn test_first_registration_wins() {
    set_app_code(9);
    let first = new_internal_error(ERR_BASIC, "first");
    let second = codeerr::new_ok(ERR_BASIC, "second");
    assert_eq!(first.business_code, second.business_code);

    let code = parse_code(&with_code(None, ERR_BASIC));
    assert_eq!(code.message, "first");
    assert_eq!(code.http_code, STATUS_INTERNAL_SERVER_ERROR);
}
