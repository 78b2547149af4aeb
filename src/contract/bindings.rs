//! ABI of the deployed OTP authenticator contract.

use alloy::sol;

sol! {
    #[sol(rpc)]
    interface IOtpAuthenticator {
        function registerUser(string calldata username, uint256 seed) external;
        function generateOTP() external returns (uint256);
        function authenticate(address publicKey, uint256 otp) external view returns (bool);
    }
}

#[cfg(test)]
mod tests {
    use super::IOtpAuthenticator;
    use alloy::primitives::{keccak256, Address, U256};
    use alloy::sol_types::SolCall;

    fn selector_of(signature: &str) -> [u8; 4] {
        let hash = keccak256(signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    #[test]
    fn test_signatures() {
        assert_eq!(
            IOtpAuthenticator::registerUserCall::SIGNATURE,
            "registerUser(string,uint256)"
        );
        assert_eq!(IOtpAuthenticator::generateOTPCall::SIGNATURE, "generateOTP()");
        assert_eq!(
            IOtpAuthenticator::authenticateCall::SIGNATURE,
            "authenticate(address,uint256)"
        );
    }

    #[test]
    fn test_selectors_match_keccak() {
        assert_eq!(
            IOtpAuthenticator::registerUserCall::SELECTOR,
            selector_of("registerUser(string,uint256)")
        );
        assert_eq!(
            IOtpAuthenticator::authenticateCall::SELECTOR,
            selector_of("authenticate(address,uint256)")
        );
    }

    #[test]
    fn test_authenticate_calldata_layout() {
        let account = Address::repeat_byte(0x11);
        let call = IOtpAuthenticator::authenticateCall {
            publicKey: account,
            otp: U256::from(987_654u64),
        };
        let data = call.abi_encode();
        assert_eq!(data.len(), 4 + 32 + 32);
        assert_eq!(&data[..4], &IOtpAuthenticator::authenticateCall::SELECTOR);
        assert_eq!(&data[16..36], account.as_slice());
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(987_654u64));
    }
}
