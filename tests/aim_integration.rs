mod common;

use authorizenet::{
    GatewayError,
    core::response::{PositionalResponse, RESPONSE_LABELS},
    core::transaction::GatewayTransaction,
    gateway::aim::{AimTransaction, MOCK_AIM_FIELDS},
};
use common::{AIM_URL, MockTransport, config, init_logger};

fn card_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("x_first_name", "John"),
        ("x_last_name", "Smith"),
        ("x_card_num", "4007000000027"),
        ("x_exp_date", "12/30"),
        ("x_amount", "75.00"),
    ]
}

#[test]
fn approved_sale_posts_form_body_once() {
    init_logger();

    let mut transport = MockTransport::new();
    transport
        .expect_post()
        .withf(|request| {
            request.url == AIM_URL
                && request.body.contains("x_login=test-login")
                && request.body.contains("x_card_num=4007000000027")
                && request.body.contains("x_type=AUTH_CAPTURE")
                && request.body.contains("x_test_request=FALSE")
        })
        .times(1)
        .returning(|_| {
            Ok("1|1|1|This transaction has been approved.|QWE123|Y|60123456789|||75.00|CC|\
                auth_capture"
                .to_string())
        });

    let mut transaction = AimTransaction::new(&config(false, false), card_fields());
    transaction.execute(&transport).unwrap();

    assert!(transaction.is_approved());
    assert_eq!(transaction.response_code(), "1");
    assert_eq!(transaction.response_message(), "This transaction has been approved.");
    assert_eq!(transaction.transaction_id(), "60123456789");

    let code = transaction.code_named_response();
    assert_eq!(code.len(), 12);
    assert_eq!(code["transaction_type"], "auth_capture");
}

#[test]
fn debug_mode_sends_test_authorization() {
    init_logger();

    let mut transport = MockTransport::new();
    transport
        .expect_post()
        .withf(|request| {
            request.body.contains("x_type=AUTH_ONLY")
                && request.body.contains("x_test_request=TRUE")
        })
        .times(1)
        .returning(|_| Ok("1|1|1|(TESTMODE) This transaction has been approved.".to_string()));

    let mut transaction = AimTransaction::new(&config(true, false), card_fields());
    transaction.execute(&transport).unwrap();

    assert!(transaction.is_approved());
    assert_eq!(transaction.fields().get("x_type"), "AUTH_CAPTURE");
}

#[test]
fn short_test_mode_response_decodes_four_keys() {
    let mut transport = MockTransport::new();
    transport
        .expect_post()
        .times(1)
        .returning(|_| Ok("1|1|1|(TESTMODE) approved".to_string()));

    let mut transaction = AimTransaction::new(&config(false, false), card_fields());
    transaction.execute(&transport).unwrap();

    let nice = transaction.nice_named_response();
    assert_eq!(nice.len(), 4);
    assert_eq!(
        nice.first(),
        Some((&"Response Code".to_string(), &"1".to_string()))
    );

    let code = transaction.code_named_response();
    assert_eq!(code.len(), 4);
    assert_eq!(
        code.first(),
        Some((&"response_code".to_string(), &"1".to_string()))
    );
}

#[test]
fn transport_failure_surfaces_without_retry() {
    init_logger();

    let mut transport = MockTransport::new();
    transport
        .expect_post()
        .times(1)
        .returning(|_| Err(GatewayError::Transport("connection refused".to_string())));

    let mut transaction = AimTransaction::new(&config(false, false), card_fields());
    let result = transaction.execute(&transport);

    assert!(matches!(result, Err(GatewayError::Transport(_))));
    assert!(!transaction.is_approved());
    assert_eq!(transaction.response_code(), "");
    assert!(transaction.raw_response().is_empty());
}

#[test]
fn mock_mode_never_calls_transport() {
    init_logger();

    let mut transport = MockTransport::new();
    transport.expect_post().never();

    let mut transaction = AimTransaction::new(
        &config(false, true),
        [("x_amount", "1.00"), ("x_first_name", "Someone Else")],
    );
    transaction.execute(&transport).unwrap();

    assert!(transaction.is_approved());
    assert_eq!(transaction.response_message(), MOCK_AIM_FIELDS[3]);
    assert_eq!(transaction.nice_named_response()["Cardholder First Name"], "John");
}

#[test]
fn canned_response_round_trips_through_both_label_schemes() {
    let response = PositionalResponse::new(MOCK_AIM_FIELDS.iter().map(|v| v.to_string()).collect());

    let nice = response.decode_nice();
    let code = response.decode_code();

    assert_eq!(nice.len(), MOCK_AIM_FIELDS.len());
    assert_eq!(code.len(), MOCK_AIM_FIELDS.len());
    for (position, (nice_label, code_label)) in RESPONSE_LABELS.iter().enumerate() {
        assert_eq!(nice.get_index(position).unwrap().0, nice_label);
        assert_eq!(nice[*nice_label], MOCK_AIM_FIELDS[position]);
        assert_eq!(code.get_index(position).unwrap().0, code_label);
        assert_eq!(code[*code_label], MOCK_AIM_FIELDS[position]);
    }
}

#[test]
fn approval_is_exact_string_match() {
    for (body, approved) in [
        ("1|1|1|ok", true),
        ("0|1|1|error", false),
        ("3|1|6|The credit card number is invalid.", false),
        ("", false),
    ] {
        let mut transport = MockTransport::new();
        let reply = body.to_string();
        transport
            .expect_post()
            .times(1)
            .returning(move |_| Ok(reply.clone()));

        let mut transaction = AimTransaction::new(&config(false, false), card_fields());
        transaction.execute(&transport).unwrap();

        assert_eq!(transaction.is_approved(), approved, "body: {:?}", body);
    }
}
