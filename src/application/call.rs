use crate::domain::account::AccountId;
use crate::domain::owner::OwnerPayload;
use crate::domain::user::UserPayload;

/// A mutating ledger call, decoded by an interface and waiting for
/// [`RentalEngine::execute`](super::engine::RentalEngine::execute).
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    RegisterOwner(OwnerPayload),
    RegisterUser(UserPayload),
    Rent { owner: AccountId },
    ReturnCar { owner: AccountId },
}

impl Call {
    /// Short operation name, as used in logs and input files.
    pub fn name(&self) -> &'static str {
        match self {
            Call::RegisterOwner(_) => "register_owner",
            Call::RegisterUser(_) => "register_user",
            Call::Rent { .. } => "rent",
            Call::ReturnCar { .. } => "return_car",
        }
    }
}
