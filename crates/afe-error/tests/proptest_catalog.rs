// SPDX-License-Identifier: MIT OR Apache-2.0
//! Property-based tests for catalog construction.

use afe_error::{AfeError, AfeErrorDto, DEFAULT_DOMAIN, ErrorCode, user_info_keys};
use proptest::prelude::*;

fn arb_code() -> impl Strategy<Value = ErrorCode> {
    proptest::sample::select(ErrorCode::ALL.to_vec())
}

fn arb_domain() -> BoxedStrategy<String> {
    "[a-z]{1,8}(\\.[a-z0-9]{1,8}){0,3}".boxed()
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, ..ProptestConfig::default() })]

    #[test]
    fn reason_is_stored_verbatim(code in arb_code(), reason in ".*") {
        let err = AfeError::new(code, reason.clone());
        prop_assert_eq!(err.failure_reason(), Some(reason.as_str()));
        prop_assert_eq!(err.user_info.len(), 1);
        prop_assert_eq!(err.domain.as_str(), DEFAULT_DOMAIN);
        prop_assert_eq!(err.code, i64::from(code.code()));
        prop_assert_eq!(err.kind(), Some(code));
    }

    #[test]
    fn raw_code_and_domain_are_kept(domain in arb_domain(), code in any::<i64>(), reason in ".*") {
        let err = AfeError::with_raw_code(domain.clone(), code, reason.clone());
        prop_assert_eq!(err.domain, domain);
        prop_assert_eq!(err.code, code);
        prop_assert_eq!(
            err.user_info.get(user_info_keys::FAILURE_REASON).and_then(|v| v.as_str()),
            Some(reason.as_str())
        );
    }

    #[test]
    fn from_code_only_resolves_published_values(code in any::<i64>()) {
        match ErrorCode::from_code(code) {
            Some(kind) => prop_assert_eq!(i64::from(kind.code()), code),
            None => prop_assert!(!(-6007..=-6000).contains(&code)),
        }
    }

    #[test]
    fn dto_json_preserves_fields(code in arb_code(), reason in ".*", status in any::<u16>()) {
        let err = AfeError::new(code, reason).with_status_code(status);
        let dto = AfeErrorDto::from(&err);
        let json = serde_json::to_string(&dto).unwrap();
        let back: AfeErrorDto = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(&back, &dto);
        prop_assert_eq!(AfeError::from(back).status_code(), Some(status));
    }
}
