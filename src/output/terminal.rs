//! Terminal output of the single network analysis.
//!
//! Each address row shows the dotted decimal, binary and hex forms:
//!
//! ```text
//!                DEC                 BIN                                     HEX
//! Addr           192.168.001.010     11000000.10101000.00000001.00001010     c0.a8.01.0a
//! ```

use crate::models::{NetworkInfo, NetworkKind};
use colored::Colorize;
use itertools::Itertools;
use std::net::Ipv4Addr;

const LABEL_WIDTH: usize = 15;
const DEC_WIDTH: usize = 20;
const BIN_WIDTH: usize = 40;

/// Format a value as a left-aligned field of at least `width` chars.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:<width$}")
}

fn dec(addr: Ipv4Addr) -> String {
    addr.octets().iter().map(|o| format!("{o:03}")).join(".")
}

fn bin(addr: Ipv4Addr) -> String {
    addr.octets().iter().map(|o| format!("{o:08b}")).join(".")
}

fn hex(addr: Ipv4Addr) -> String {
    addr.octets().iter().map(|o| format!("{o:02x}")).join(".")
}

fn label(name: &str, color: bool) -> String {
    let padded = format_field(name, LABEL_WIDTH);
    if color {
        padded.bold().to_string()
    } else {
        padded
    }
}

fn addr_row(name: &str, addr: Ipv4Addr, color: bool) -> String {
    format!(
        "{}{}{}{}",
        label(name, color),
        format_field(dec(addr), DEC_WIDTH),
        format_field(bin(addr), BIN_WIDTH),
        hex(addr)
    )
}

fn missing_row(name: &str, text: &str, color: bool) -> String {
    let text = if color {
        text.yellow().to_string()
    } else {
        text.to_string()
    };
    format!("{}{}", label(name, color), text)
}

/// Render the DEC/BIN/HEX table for one network.
pub fn render_analysis(info: &NetworkInfo, color: bool) -> String {
    let no_net = info.kind != NetworkKind::Standard;
    let mut rows = vec![
        format!(
            "{}{}{}HEX",
            format_field("", LABEL_WIDTH),
            format_field("DEC", DEC_WIDTH),
            format_field("BIN", BIN_WIDTH)
        ),
        addr_row("Addr", info.cidr.addr, color),
        format!("{}{}", label("Bitmask", color), info.prefix_len()),
        addr_row("Netmask", info.netmask, color),
        addr_row("Wildcard", info.wildcard, color),
    ];

    rows.push(if no_net {
        missing_row("Network", "No network", color)
    } else {
        addr_row("Network", info.network, color)
    });
    rows.push(match info.broadcast {
        Some(b) if !no_net => addr_row("Broadcast", b, color),
        _ => missing_row("Broadcast", "No broadcast", color),
    });
    match (info.host_min, info.host_max) {
        (Some(lo), Some(hi)) => {
            rows.push(addr_row("Hostmin", lo, color));
            rows.push(addr_row("Hostmax", hi, color));
        }
        _ => {
            rows.push(missing_row("Hostmin", "No hosts", color));
            rows.push(missing_row("Hostmax", "No hosts", color));
        }
    }
    rows.push(format!("{}{}", label("Hosts", color), info.host_count));

    rows.join("\n")
}
