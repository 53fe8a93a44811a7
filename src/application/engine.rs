use super::call::Call;
use crate::domain::account::{AccountId, CallContext};
use crate::domain::owner::{Owner, OwnerPayload};
use crate::domain::ports::{OwnerRegistryBox, SettlementBox, UserRegistryBox};
use crate::domain::user::{User, UserPayload};
use crate::domain::validation;
use crate::error::{RentalError, Result};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub const USER_NOT_REGISTERED: &str = "You must be a registered user to run this command.";
pub const OWNER_NOT_REGISTERED: &str =
    "You have to enter a registered owner account to run this command.";
pub const CAR_UNAVAILABLE: &str = "The owner's car isn't available.";

/// The rental ledger.
///
/// `RentalEngine` owns both registries and the settlement port. Every mutating
/// operation holds the write side of `state_lock` from its first registry read
/// to its last write, and reads hold the read side, so calls behave as if
/// processed one at a time and no reader observes a rent whose transfer is
/// still pending. A failed call leaves both registries as they were and moves
/// no value.
pub struct RentalEngine {
    owners: OwnerRegistryBox,
    users: UserRegistryBox,
    settlement: SettlementBox,
    state_lock: RwLock<()>,
}

impl RentalEngine {
    /// Creates a new `RentalEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `owners` - The registry of car owners.
    /// * `users` - The registry of car users.
    /// * `settlement` - Where rental payments are sent.
    pub fn new(owners: OwnerRegistryBox, users: UserRegistryBox, settlement: SettlementBox) -> Self {
        Self {
            owners,
            users,
            settlement,
            state_lock: RwLock::new(()),
        }
    }

    /// Dispatches a decoded call to the matching operation.
    pub async fn execute(&self, ctx: &CallContext, call: Call) -> Result<()> {
        debug!(op = call.name(), caller = %ctx.caller, deposit = %ctx.attached_deposit, "Executing call");
        match call {
            Call::RegisterOwner(payload) => self.register_owner(ctx, payload).await,
            Call::RegisterUser(payload) => self.register_user(ctx, payload).await,
            Call::Rent { owner } => self.rent(ctx, &owner).await,
            Call::ReturnCar { owner } => self.return_car(ctx, &owner).await,
        }
    }

    /// Registers (or re-registers) the caller as a car owner.
    ///
    /// Requires a name of at least three characters, a registration fee of at
    /// least one base unit and a price above one base unit. The fee is kept by
    /// the ledger. Any account in the payload is replaced by the caller.
    pub async fn register_owner(&self, ctx: &CallContext, payload: OwnerPayload) -> Result<()> {
        validation::check_name(&payload.name)?;
        validation::check_registration_fee(ctx.attached_deposit)?;
        validation::check_price(payload.price)?;

        if payload.account.as_ref().is_some_and(|a| a != &ctx.caller) {
            debug!(caller = %ctx.caller, "Ignoring account supplied in owner payload");
        }

        let _guard = self.state_lock.write().await;
        let owner = Owner::from_payload(payload, ctx.caller.clone());
        let (id, price) = (owner.id, owner.price);
        self.owners.set(&ctx.caller, owner).await?;

        info!(account = %ctx.caller, %id, %price, "Car owner successfully registered.");
        Ok(())
    }

    /// Registers (or re-registers) the caller as a car user.
    pub async fn register_user(&self, ctx: &CallContext, payload: UserPayload) -> Result<()> {
        validation::check_name(&payload.name)?;
        validation::check_registration_fee(ctx.attached_deposit)?;

        if payload.account.as_ref().is_some_and(|a| a != &ctx.caller) {
            debug!(caller = %ctx.caller, "Ignoring account supplied in user payload");
        }

        let _guard = self.state_lock.write().await;
        let user = User::from_payload(payload, ctx.caller.clone());
        let id = user.id;
        self.users.set(&ctx.caller, user).await?;

        info!(account = %ctx.caller, %id, "Car user successfully registered.");
        Ok(())
    }

    pub async fn get_owner(&self, account: &AccountId) -> Result<Option<Owner>> {
        let _guard = self.state_lock.read().await;
        self.owners.get(account).await
    }

    pub async fn list_owners(&self) -> Result<Vec<Owner>> {
        let _guard = self.state_lock.read().await;
        self.owners.values().await
    }

    pub async fn get_user(&self, account: &AccountId) -> Result<Option<User>> {
        let _guard = self.state_lock.read().await;
        self.users.get(account).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let _guard = self.state_lock.read().await;
        self.users.values().await
    }

    /// Rents the car listed by `owner_account` to the caller.
    ///
    /// Checks, in order: the caller is a registered user, the owner is
    /// registered, the car is available, and the attached deposit equals the
    /// price exactly. On success the deposit is forwarded to the owner, the
    /// car becomes unavailable and the caller is marked as renting.
    pub async fn rent(&self, ctx: &CallContext, owner_account: &AccountId) -> Result<()> {
        let _guard = self.state_lock.write().await;

        let mut user = self.require_user(&ctx.caller).await?;
        let mut owner = self.require_owner(owner_account).await?;
        if !owner.available {
            return Err(RentalError::UnavailableError(CAR_UNAVAILABLE.to_string()));
        }
        let amount = validation::check_deposit(ctx.attached_deposit, owner.price)?;

        let previous_owner = owner.clone();
        let previous_user = user.clone();
        owner.mark_rented();
        user.mark_renting();

        // Flags are staged first and rolled back if the transfer does not go
        // through, so a failed transfer never leaves a car locked.
        self.owners.set(owner_account, owner).await?;
        if let Err(err) = self.users.set(&ctx.caller, user).await {
            self.restore_owner(owner_account, previous_owner).await;
            return Err(err);
        }

        if let Err(err) = self.settlement.transfer(owner_account, amount).await {
            warn!(owner = %owner_account, renter = %ctx.caller, error = %err, "Rental payment failed, rolling back");
            self.restore_owner(owner_account, previous_owner).await;
            self.restore_user(&ctx.caller, previous_user).await;
            return Err(err);
        }

        info!(owner = %owner_account, renter = %ctx.caller, %amount, "Car rented.");
        Ok(())
    }

    /// Returns the car listed by `owner_account`.
    ///
    /// The car becomes available again and the caller's rental flag is
    /// cleared, each only if it was set. The caller does not have to be the
    /// user who rented this car. Nothing is refunded.
    pub async fn return_car(&self, ctx: &CallContext, owner_account: &AccountId) -> Result<()> {
        let _guard = self.state_lock.write().await;

        let mut user = self.require_user(&ctx.caller).await?;
        let mut owner = self.require_owner(owner_account).await?;

        let previous_owner = owner.clone();
        let owner_changed = owner.mark_returned();
        if owner_changed {
            self.owners.set(owner_account, owner).await?;
        }

        if user.mark_returned()
            && let Err(err) = self.users.set(&ctx.caller, user).await
        {
            if owner_changed {
                self.restore_owner(owner_account, previous_owner).await;
            }
            return Err(err);
        }

        if owner_changed {
            info!(owner = %owner_account, user = %ctx.caller, "The user has returned the rented car and now is available again.");
        } else {
            debug!(owner = %owner_account, user = %ctx.caller, "Car was already available");
        }
        Ok(())
    }

    // Rollback writes are best effort: a failure is logged and the error that
    // triggered the rollback is the one reported to the caller.
    async fn restore_owner(&self, account: &AccountId, previous: Owner) {
        if let Err(err) = self.owners.set(account, previous).await {
            warn!(owner = %account, error = %err, "Failed to restore owner record");
        }
    }

    async fn restore_user(&self, account: &AccountId, previous: User) {
        if let Err(err) = self.users.set(account, previous).await {
            warn!(user = %account, error = %err, "Failed to restore user record");
        }
    }

    async fn require_user(&self, account: &AccountId) -> Result<User> {
        self.users
            .get(account)
            .await?
            .ok_or_else(|| RentalError::NotRegisteredError(USER_NOT_REGISTERED.to_string()))
    }

    async fn require_owner(&self, account: &AccountId) -> Result<Owner> {
        self.owners
            .get(account)
            .await?
            .ok_or_else(|| RentalError::NotRegisteredError(OWNER_NOT_REGISTERED.to_string()))
    }
}
