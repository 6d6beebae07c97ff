use super::*;

/// Capability to act as the contract instance that holds it.
///
/// It is retrieved once while the instance is initialized and lives in the
/// instance state afterwards. It can neither be cloned nor copied out, so
/// holding it is the capability itself: its contents take no part in
/// producing a [`Signer`]. The recorded origin is informational only.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SignerCapability {
    /// Account that created the instance.
    origin: AccountAddress,
}

impl SignerCapability {
    /// Retrieve the capability for the instance being initialized.
    pub fn retrieve(ctx: &impl HasInitContext) -> Self {
        Self {
            origin: ctx.init_origin(),
        }
    }

    /// Account that created the instance holding this capability.
    pub fn origin(&self) -> AccountAddress {
        self.origin
    }

    /// Act as the instance the receive context is executing in.
    /// Requires access to the capability itself.
    pub fn create_signer(&self, ctx: &impl HasReceiveContext) -> Signer {
        Signer {
            address: Address::Contract(ctx.self_address()),
        }
    }
}

/// Proof of acting as `address` during the current call.
#[derive(Debug)]
pub struct Signer {
    address: Address,
}

impl Signer {
    pub fn address(&self) -> Address {
        self.address
    }

    #[concordium_cfg_test]
    pub(crate) fn for_test(address: Address) -> Self {
        Self { address }
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_std::test_infrastructure::*;

    const ORIGIN: AccountAddress = AccountAddress([7; 32]);
    const SELF_ADDRESS: ContractAddress = ContractAddress {
        index: 42,
        subindex: 0,
    };

    #[concordium_test]
    fn test_signer_acts_as_instance() {
        let mut init_ctx = TestInitContext::empty();
        init_ctx.set_init_origin(ORIGIN);
        let signer_cap = SignerCapability::retrieve(&init_ctx);
        claim_eq!(signer_cap.origin(), ORIGIN);

        let mut ctx = TestReceiveContext::empty();
        ctx.set_self_address(SELF_ADDRESS)
            .set_sender(Address::Account(ORIGIN));
        let signer = signer_cap.create_signer(&ctx);

        claim_eq!(signer.address(), Address::Contract(SELF_ADDRESS));
    }
}
