//! Calldata builders and return decoders for the token and faucet contracts

use crate::error::{FaucetError, FaucetResult};
use ethabi::{ParamType, Token};
use mtk_common::{Address, U256};

/// Encoded call to a contract function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub to: Address,
    pub function: &'static str,
    pub data: Vec<u8>,
}

impl ContractCall {
    fn new(to: Address, function: &'static str, params: &[ParamType], args: &[Token]) -> Self {
        let mut data = ethabi::short_signature(function, params).to_vec();
        data.extend(ethabi::encode(args));
        Self { to, function, data }
    }
}

/// ERC-20 token with an open `mint`
#[derive(Debug, Clone, Copy)]
pub struct TokenContract {
    pub address: Address,
}

impl TokenContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn decimals(&self) -> ContractCall {
        ContractCall::new(self.address, "decimals", &[], &[])
    }

    pub fn balance_of(&self, owner: Address) -> ContractCall {
        ContractCall::new(
            self.address,
            "balanceOf",
            &[ParamType::Address],
            &[Token::Address(owner.into())],
        )
    }

    pub fn mint(&self, amount: U256) -> ContractCall {
        ContractCall::new(self.address, "mint", &[ParamType::Uint(256)], &[Token::Uint(amount)])
    }

    pub fn approve(&self, spender: Address, amount: U256) -> ContractCall {
        ContractCall::new(
            self.address,
            "approve",
            &[ParamType::Address, ParamType::Uint(256)],
            &[Token::Address(spender.into()), Token::Uint(amount)],
        )
    }
}

/// Faucet handing out a capped amount per address per interval
#[derive(Debug, Clone, Copy)]
pub struct FaucetContract {
    pub address: Address,
}

impl FaucetContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn get_drip_limit(&self) -> ContractCall {
        ContractCall::new(self.address, "getDripLimit", &[], &[])
    }

    pub fn get_drip_interval(&self) -> ContractCall {
        ContractCall::new(self.address, "getDripInterval", &[], &[])
    }

    pub fn get_drip_time(&self, account: Address) -> ContractCall {
        ContractCall::new(
            self.address,
            "getDripTime",
            &[ParamType::Address],
            &[Token::Address(account.into())],
        )
    }

    pub fn owner(&self) -> ContractCall {
        ContractCall::new(self.address, "owner", &[], &[])
    }

    pub fn drip(&self, amount: U256) -> ContractCall {
        self.uint_call("drip", amount)
    }

    pub fn deposit(&self, amount: U256) -> ContractCall {
        self.uint_call("deposit", amount)
    }

    pub fn set_drip_interval(&self, seconds: U256) -> ContractCall {
        self.uint_call("setDripInterval", seconds)
    }

    pub fn set_drip_limit(&self, amount: U256) -> ContractCall {
        self.uint_call("setDripLimit", amount)
    }

    fn uint_call(&self, function: &'static str, value: U256) -> ContractCall {
        ContractCall::new(self.address, function, &[ParamType::Uint(256)], &[Token::Uint(value)])
    }
}

fn decode_single(kind: ParamType, data: &[u8]) -> FaucetResult<Token> {
    ethabi::decode(&[kind], data)?
        .pop()
        .ok_or_else(|| FaucetError::Internal("empty ABI return".to_string()))
}

/// Decodes a single `uintN` return value
pub fn decode_uint(data: &[u8]) -> FaucetResult<U256> {
    match decode_single(ParamType::Uint(256), data)? {
        Token::Uint(v) => Ok(v),
        other => Err(FaucetError::Internal(format!("expected uint, got {:?}", other))),
    }
}

/// Decodes `decimals()`; values that do not fit a `u8` are rejected
pub fn decode_decimals(data: &[u8]) -> FaucetResult<u8> {
    let value = decode_uint(data)?;
    if value > U256::from(u8::MAX) {
        return Err(FaucetError::Internal(format!("decimals out of range: {}", value)));
    }
    Ok(value.low_u32() as u8)
}

/// Decodes a single `address` return value
pub fn decode_address(data: &[u8]) -> FaucetResult<Address> {
    match decode_single(ParamType::Address, data)? {
        Token::Address(a) => Ok(a.into()),
        other => Err(FaucetError::Internal(format!("expected address, got {:?}", other))),
    }
}
