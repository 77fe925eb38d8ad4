//! Request envelope shaping.

use hlx_core::{Action, ActionKind};
use hlx_signer::SignatureResult;
use serde::Serialize;

use crate::context::ExecutionContext;
use crate::field::WireField;

/// JSON body posted to `/exchange`.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    pub action: Action,
    /// Same value the signature was computed over.
    pub nonce: u64,
    pub signature: SignatureResult,
    #[serde(rename = "vaultAddress", skip_serializing_if = "WireField::is_absent")]
    pub vault_address: WireField<String>,
    #[serde(rename = "expiresAfter", skip_serializing_if = "Option::is_none")]
    pub expires_after: Option<u64>,
}

/// Builds [`RequestEnvelope`]s from a signed action and its context.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadBuilder;

impl PayloadBuilder {
    pub fn build(
        action: Action,
        signature: SignatureResult,
        nonce: u64,
        context: &ExecutionContext,
    ) -> RequestEnvelope {
        let vault_address = Self::vault_field(&action.kind(), context);
        RequestEnvelope {
            action,
            nonce,
            signature,
            vault_address,
            expires_after: context.expires_after(),
        }
    }

    /// `vaultAddress` policy.
    ///
    /// - no vault: absent
    /// - vault + `usdClassTransfer`: explicit null (the exchange rejects vault
    ///   attribution for class transfers)
    /// - vault + anything else: the vault
    pub fn vault_field(kind: &ActionKind, context: &ExecutionContext) -> WireField<String> {
        match context.vault_address() {
            None => WireField::Absent,
            Some(_) if kind.is_usd_class_transfer() => WireField::Null,
            Some(vault) => WireField::Present(vault.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use hlx_core::{Grouping, RawAction};
    use serde_json::{json, Value};

    fn signature() -> SignatureResult {
        SignatureResult {
            r: "0x01".to_string(),
            s: "0x02".to_string(),
            v: 27,
        }
    }

    fn envelope_json(action: Action, context: &ExecutionContext) -> Value {
        serde_json::to_value(PayloadBuilder::build(action, signature(), 1000, context)).unwrap()
    }

    fn all_kinds() -> Vec<Action> {
        vec![
            Action::order(vec![], Grouping::Na),
            Action::cancel(vec![]),
            Action::noop(),
            Action::usd_class_transfer("1", true, 1000),
            Action::Raw(RawAction::from_value(json!({"type": "usdClassTransfer"})).unwrap()),
            Action::Raw(RawAction::from_value(json!({"type": "spotSend"})).unwrap()),
            Action::Raw(RawAction::from_value(json!({"no_type": true})).unwrap()),
        ]
    }

    #[test]
    fn test_base_fields_and_order() {
        let context = ExecutionContext::new(Network::Testnet);
        let body = serde_json::to_string(&PayloadBuilder::build(
            Action::noop(),
            signature(),
            1000,
            &context,
        ))
        .unwrap();

        assert_eq!(
            body,
            r#"{"action":{"type":"noop"},"nonce":1000,"signature":{"r":"0x01","s":"0x02","v":27}}"#
        );
    }

    #[test]
    fn test_vault_present_for_non_class_transfer() {
        let context = ExecutionContext::new(Network::Testnet).with_vault_address("0xABC");
        let json = envelope_json(Action::order(vec![], Grouping::Na), &context);
        assert_eq!(json["vaultAddress"], "0xABC");
    }

    #[test]
    fn test_vault_null_for_class_transfer() {
        let context = ExecutionContext::new(Network::Testnet).with_vault_address("0xABC");

        for action in [
            Action::usd_class_transfer("1", false, 1000),
            Action::Raw(
                RawAction::from_value(json!({"type": "usdClassTransfer", "amount": "1"})).unwrap(),
            ),
        ] {
            let json = envelope_json(action, &context);
            let object = json.as_object().unwrap();
            assert!(object.contains_key("vaultAddress"));
            assert!(object["vaultAddress"].is_null());
        }
    }

    #[test]
    fn test_no_vault_key_without_vault() {
        let context = ExecutionContext::new(Network::Testnet);
        for action in all_kinds() {
            let json = envelope_json(action, &context);
            assert!(!json.as_object().unwrap().contains_key("vaultAddress"));
        }
    }

    #[test]
    fn test_vault_policy_total_over_kinds() {
        let context = ExecutionContext::new(Network::Testnet).with_vault_address("0xABC");
        for action in all_kinds() {
            let field = PayloadBuilder::vault_field(&action.kind(), &context);
            if action.kind().is_usd_class_transfer() {
                assert!(field.is_null());
            } else {
                assert_eq!(field.as_present().map(String::as_str), Some("0xABC"));
            }
        }
    }

    #[test]
    fn test_expires_after_independent_of_nonce() {
        let context =
            ExecutionContext::new(Network::Testnet).with_expires_after(Some(1_700_000_000_000));
        for action in all_kinds() {
            let json = envelope_json(action, &context);
            assert_eq!(json["expiresAfter"], 1_700_000_000_000u64);
            assert_eq!(json["nonce"], 1000);
        }

        let context = ExecutionContext::new(Network::Testnet);
        for action in all_kinds() {
            let json = envelope_json(action, &context);
            assert!(!json.as_object().unwrap().contains_key("expiresAfter"));
        }
    }
}
