#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use tokengate_harness::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
    balancez: # typo should fail
      - account: "0x0000000000000000000000000000000000000001"
        amount: 100
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.check_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_scenario() {
    let ok = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
"#;
    let scenario = config::load_from_str(ok).expect("must parse");
    assert_eq!(scenario.version, 1);
    assert_eq!(scenario.tokens[0].symbol, "GLD");
    assert!(scenario.redemptions.is_empty());
}

#[test]
fn version_must_be_one() {
    let bad = r#"
version: 2
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.check_code().as_str(), "BAD_REQUEST");
}

#[test]
fn tokens_must_not_be_empty() {
    let bad = r#"
version: 1
tokens: []
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.check_code().as_str(), "BAD_REQUEST");
}

#[test]
fn duplicate_token_addresses_rejected() {
    let bad = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "SLV"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.check_code().as_str(), "BAD_REQUEST");
}

#[test]
fn structured_terms_render_the_packed_blob() {
    let ok = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
redemptions:
  - label: "spend"
    subject: "0x0000000000000000000000000000000000000001"
    caveats:
      - enforcer: "balance-envelope"
        terms:
          direction: lower
          token: "0x00000000000000000000000000000000000000aa"
          recipient: "0x0000000000000000000000000000000000000002"
          threshold: 100
    ops:
      - op: transfer
        token: "0x00000000000000000000000000000000000000aa"
        to: "0x0000000000000000000000000000000000000002"
        amount: 50
"#;
    let scenario = config::load_from_str(ok).expect("must parse");
    let blob = scenario.redemptions[0].caveats[0]
        .terms
        .to_blob()
        .expect("structured terms must render");

    assert_eq!(blob.len(), 73);
    assert_eq!(blob[0], 0x01);
    assert_eq!(&blob[1..21], &hex::decode("00000000000000000000000000000000000000aa").unwrap()[..]);
    assert_eq!(blob[72], 100);
}

#[test]
fn hex_terms_pass_load_even_with_odd_lengths() {
    // Load-time validation only checks the hex charset. A wrong-sized blob
    // must reach the enforcer and fail there, not here.
    let ok = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
redemptions:
  - label: "short-terms"
    subject: "0x0000000000000000000000000000000000000001"
    caveats:
      - enforcer: "balance-envelope"
        terms: "0x0102"
"#;
    let scenario = config::load_from_str(ok).expect("must parse");
    let blob = scenario.redemptions[0].caveats[0].terms.to_blob().unwrap();
    assert_eq!(blob.len(), 2);
}

#[test]
fn bad_hex_terms_rejected_at_load_time() {
    let bad = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
redemptions:
  - label: "bad-terms"
    subject: "0x0000000000000000000000000000000000000001"
    caveats:
      - enforcer: "balance-envelope"
        terms: "0xnothex"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.check_code().as_str(), "BAD_REQUEST");
}

#[test]
fn mode_defaults_to_default_batch() {
    let ok = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
redemptions:
  - label: "plain"
    subject: "0x0000000000000000000000000000000000000001"
"#;
    let scenario = config::load_from_str(ok).expect("must parse");
    assert_eq!(scenario.redemptions[0].mode.as_str(), "default_batch");
}

#[test]
fn redemption_label_must_not_be_empty() {
    let bad = r#"
version: 1
tokens:
  - address: "0x00000000000000000000000000000000000000aa"
    symbol: "GLD"
redemptions:
  - label: ""
    subject: "0x0000000000000000000000000000000000000001"
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.check_code().as_str(), "BAD_REQUEST");
}
