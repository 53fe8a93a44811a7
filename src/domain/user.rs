use super::account::AccountId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered renter. A user holds at most one rental at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub account: AccountId,
    pub name: String,
    /// Set while a rental is outstanding.
    pub has_rented: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Never trusted. The stored account is always the caller.
    #[serde(default)]
    pub account: Option<AccountId>,
    pub name: String,
    #[serde(default)]
    pub has_rented: bool,
}

impl UserPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            account: None,
            name: name.into(),
            has_rented: false,
        }
    }
}

impl User {
    pub fn from_payload(payload: UserPayload, caller: AccountId) -> Self {
        Self {
            id: payload.id.unwrap_or_else(Uuid::new_v4),
            account: caller,
            name: payload.name,
            has_rented: payload.has_rented,
        }
    }

    pub fn mark_renting(&mut self) {
        self.has_rented = true;
    }

    /// Clears the rental flag. Returns `false` if there was nothing to clear.
    pub fn mark_returned(&mut self) -> bool {
        if !self.has_rented {
            return false;
        }
        self.has_rented = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_payload_binds_caller() {
        let mut payload = UserPayload::new("Bob");
        payload.account = Some(AccountId::from("alice.near"));

        let user = User::from_payload(payload, AccountId::from("bob.near"));
        assert_eq!(user.account, AccountId::from("bob.near"));
        assert!(!user.has_rented);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = User::from_payload(UserPayload::new("Bob"), AccountId::from("bob.near"));
        let b = User::from_payload(UserPayload::new("Bob"), AccountId::from("bob.near"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_rental_flag_cycle() {
        let mut user = User::from_payload(UserPayload::new("Bob"), AccountId::from("bob.near"));
        assert!(!user.mark_returned());
        user.mark_renting();
        assert!(user.has_rented);
        assert!(user.mark_returned());
        assert!(!user.has_rented);
    }
}
