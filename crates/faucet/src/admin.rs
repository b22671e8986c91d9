//! Owner gate for the admin controls

use mtk_common::{same_address, Address};

/// True only when both addresses are known and name the same account.
pub fn is_admin(owner: Option<Address>, account: Option<Address>) -> bool {
    match (owner, account) {
        (Some(owner), Some(account)) => owner == account,
        _ => false,
    }
}

/// String form of [`is_admin`] for addresses that have not been parsed; letter case is ignored.
pub fn is_admin_str(owner: Option<&str>, account: Option<&str>) -> bool {
    match (owner, account) {
        (Some(owner), Some(account)) => same_address(owner, account),
        _ => false,
    }
}
