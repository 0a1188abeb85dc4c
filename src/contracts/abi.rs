//! Contract ABIs.

use alloy::sol;

sol! {
    /// Subset of ERC-20 used by the market.
    #[sol(rpc)]
    interface IERC20 {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Incentive registration contract. Pulls `amount` of `reward_token`
    /// from the caller and attaches it to `option` of `proposal`.
    #[sol(rpc)]
    interface IIncentiveRegistry {
        function add_reward_amount(
            bytes32 proposal,
            uint256 option,
            address reward_token,
            uint256 amount,
            uint256 start,
            uint256 end
        ) external;
    }

    /// Multi-token merkle distributor.
    #[sol(rpc)]
    interface IMerkleDistributor {
        struct Claim {
            address token;
            uint256 index;
            uint256 amount;
            bytes32[] merkleProof;
        }

        function claim(
            address token,
            uint256 index,
            address account,
            uint256 amount,
            bytes32[] calldata merkleProof
        ) external;

        function claimMulti(address account, Claim[] calldata claims) external;
    }
}
