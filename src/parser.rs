//! Text to model conversion for CIDR strings and partition sizes.

use crate::models::{Cidr, IpcError, MAX_LENGTH};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

lazy_static! {
    // [0-9] rather than \d, which also matches non-ASCII digits
    static ref RE_ADDR: Regex =
        Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("Invalid Regex?");
    static ref RE_NUMBER: Regex = Regex::new(r"^[0-9]+$").expect("Invalid Regex?");
}

/// Parse the dotted-quad part of `text`, up to an optional '/'.
pub fn parse_address(text: &str) -> Result<Ipv4Addr, IpcError> {
    let addr_part = text.split('/').next().unwrap_or_default();
    let caps = RE_ADDR
        .captures(addr_part)
        .ok_or_else(|| IpcError::malformed(format!("invalid address '{addr_part}'")))?;

    let mut octets = [0u8; 4];
    for (i, octet) in octets.iter_mut().enumerate() {
        let group = &caps[i + 1];
        *octet = group
            .parse::<u8>()
            .map_err(|_| IpcError::malformed(format!("octet '{group}' is out of [0,255]")))?;
    }
    log::trace!("parse_address({text}) -> {octets:?}");
    Ok(Ipv4Addr::from(octets))
}

/// Parse the digits after '/' as a prefix length in [0,32].
pub fn parse_prefix_length(text: &str) -> Result<u8, IpcError> {
    let (_, digits) = text
        .split_once('/')
        .ok_or_else(|| IpcError::malformed(format!("missing '/<prefix>' in '{text}'")))?;
    if !RE_NUMBER.is_match(digits) {
        return Err(IpcError::malformed(format!("invalid prefix '{digits}'")));
    }
    match digits.parse::<u8>() {
        Ok(len) if len <= MAX_LENGTH => Ok(len),
        _ => Err(IpcError::malformed(format!(
            "prefix '{digits}' is out of [0,{MAX_LENGTH}]"
        ))),
    }
}

/// Parse "A.B.C.D/N".
pub fn parse_cidr(text: &str) -> Result<Cidr, IpcError> {
    let addr = parse_address(text)?;
    let len = parse_prefix_length(text)?;
    Ok(Cidr { addr, len })
}

fn parse_positive(token: &str, what: &str) -> Result<u64, IpcError> {
    let token = token.trim();
    if !RE_NUMBER.is_match(token) {
        return Err(IpcError::malformed(format!("{what} '{token}' is not a positive integer")));
    }
    token
        .parse::<u64>()
        .map_err(|_| IpcError::malformed(format!("{what} '{token}' is too large")))
}

/// Parse one requested host count.
pub fn parse_size(token: &str) -> Result<u64, IpcError> {
    match parse_positive(token, "size")? {
        0 => Err(IpcError::malformed("size must be at least 1")),
        n => Ok(n),
    }
}

/// Parse requested host counts, keeping input order.
pub fn parse_size_list<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<u64>, IpcError> {
    if tokens.is_empty() {
        return Err(IpcError::EmptyRequest);
    }
    tokens.iter().map(|t| parse_size(t.as_ref())).collect()
}

/// Parse the number of equal blocks; zero is an empty request.
pub fn parse_equal_count(token: &str) -> Result<u32, IpcError> {
    let n = parse_positive(token, "count")?;
    match n {
        0 => Err(IpcError::EmptyRequest),
        n => u32::try_from(n)
            .map_err(|_| IpcError::malformed(format!("count '{n}' is too large"))),
    }
}
