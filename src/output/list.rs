//! Plain text output of partitioning results, one block per line.

use crate::models::{Cidr, SubnetList};
use colored::Colorize;

/// "A.B.C.D - A.B.C.D" per block, in allocation order.
pub fn render_blocks(blocks: &SubnetList) -> String {
    blocks
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<String>>()
        .join("\n")
}

/// Free space after the blocks, one CIDR per line under a header.
pub fn render_free(free: &[Cidr], color: bool) -> String {
    let header = if color {
        "# free".dimmed().to_string()
    } else {
        "# free".to_string()
    };
    std::iter::once(header)
        .chain(free.iter().map(|c| format!("{} - {} ({c})", c.lo(), c.hi())))
        .collect::<Vec<String>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::split_equal;

    #[test]
    fn test_render_blocks() {
        let list = split_equal(Cidr::new("192.168.1.0/24").unwrap(), 2).unwrap();
        assert_eq!(
            render_blocks(&list),
            "192.168.1.0 - 192.168.1.127\n192.168.1.128 - 192.168.1.255"
        );
        assert_eq!(render_blocks(&SubnetList::default()), "");
    }

    #[test]
    fn test_render_free() {
        let free = vec![Cidr::new("10.0.0.224/27").unwrap()];
        assert_eq!(
            render_free(&free, false),
            "# free\n10.0.0.224 - 10.0.0.255 (10.0.0.224/27)"
        );
    }
}
