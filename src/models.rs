use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use solana_program::pubkey::Pubkey;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateJournalEntryArgs {
    pub title: String,
    pub message: String,
    pub owner: Pubkey,
}

/// The program tells create and update apart by whether the entry account exists.
pub type UpdateJournalEntryArgs = CreateJournalEntryArgs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteJournalEntryArgs {
    pub title: String,
}

/// Decoded `JournalEntryState` account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntryState {
    #[serde(serialize_with = "collect_display")]
    pub owner: Pubkey,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalAccount {
    #[serde(serialize_with = "collect_display")]
    pub address: Pubkey,
    #[serde(flatten)]
    pub state: JournalEntryState,
}

pub(crate) fn collect_display<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    serializer.collect_str(value)
}

pub(crate) fn pubkey_from_str<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Pubkey::from_str(&s).map_err(|e| {
        // YAML reads an unquoted all-digit key such as the system program id as a number
        if s.parse::<f64>().is_ok() {
            serde::de::Error::custom(format!(
                "`{s}` was read as a number, quote the public key in the settings file"
            ))
        } else {
            serde::de::Error::custom(e)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_json_uses_base58_addresses() {
        let account = JournalAccount {
            address: Pubkey::new_unique(),
            state: JournalEntryState {
                owner: Pubkey::new_unique(),
                title: "Day 1".to_string(),
                message: "Hello".to_string(),
            },
        };

        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["address"], account.address.to_string());
        assert_eq!(json["owner"], account.state.owner.to_string());
        assert_eq!(json["title"], "Day 1");
        assert_eq!(json["message"], "Hello");
    }
}
