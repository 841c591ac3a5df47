//! Packed multi-hop path: `token | fee(uint24) | token [| fee | token]`

use alloy_primitives::aliases::U24;
use alloy_primitives::{hex, Bytes};

use crate::domain::routing::Route;
use crate::shared::errors::RouterError;

const ADDRESS_LEN: usize = 20;
const FEE_LEN: usize = 3;

pub fn encode_path(route: &Route) -> Result<Bytes, RouterError> {
    route.validate()?;

    let mut path = Vec::with_capacity(ADDRESS_LEN + route.len() * (FEE_LEN + ADDRESS_LEN));
    path.extend_from_slice(route.hops[0].token_in.as_slice());

    for hop in &route.hops {
        let fee = U24::try_from(hop.pool.fee.ppm()).ok().ok_or_else(|| {
            RouterError::RouteIntegrity(format!(
                "fee {} ppm of pool {} does not fit uint24",
                hop.pool.fee.ppm(),
                hop.pool.address
            ))
        })?;
        path.extend_from_slice(&fee.to_be_bytes_vec());
        path.extend_from_slice(hop.token_out.as_slice());
    }

    Ok(Bytes::from(path))
}

pub fn encode_path_hex(route: &Route) -> Result<String, RouterError> {
    encode_path(route).map(hex::encode_prefixed)
}
