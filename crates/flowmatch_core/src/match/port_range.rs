use flowmatch_range::{Block, PortRange, RangeError};

use super::MatchValue;
use crate::field::Direction;

/// Anything that expands into masked transport port matches.
pub trait PortRanger {
    /// One [MatchValue::TransportPort] per block, ascending, covering the range exactly.
    fn masked_ports(&self) -> Result<Vec<MatchValue>, RangeError>;
}

/// TransportPortRange is an inclusive port range on `tp_src` or `tp_dst`.
#[derive(Eq, PartialEq, Hash, Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransportPortRange {
    pub dir: Direction,
    pub range: PortRange,
}

impl TransportPortRange {
    pub fn source(start: u16, end: u16) -> Self {
        Self {
            dir: Direction::Source,
            range: PortRange::new(start, end),
        }
    }

    pub fn destination(start: u16, end: u16) -> Self {
        Self {
            dir: Direction::Destination,
            range: PortRange::new(start, end),
        }
    }

    pub fn describe(&self) -> String {
        let ctor = match self.dir {
            Direction::Source => "source",
            Direction::Destination => "destination",
        };
        format!(
            "TransportPortRange::{}({}, {})",
            ctor, self.range.start, self.range.end
        )
    }

    fn port_of(&self, block: &Block) -> Result<MatchValue, RangeError> {
        let narrow = |v: u64| {
            u16::try_from(v).map_err(|_| RangeError::ExceedsWidth {
                value: v,
                width: u16::BITS,
            })
        };
        Ok(MatchValue::TransportPort {
            dir: self.dir,
            port: narrow(block.value)?,
            mask: narrow(block.mask())?,
        })
    }
}

impl PortRanger for TransportPortRange {
    fn masked_ports(&self) -> Result<Vec<MatchValue>, RangeError> {
        let blocks = self.range.decompose()?;
        tracing::debug!(range = %self.describe(), blocks = blocks.len(), "expanded port range");
        blocks.iter().map(|b| self.port_of(b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(r: &TransportPortRange) -> Vec<String> {
        r.masked_ports()
            .unwrap()
            .iter()
            .map(|m| m.encode().unwrap())
            .collect()
    }

    #[test]
    fn test_masked_ports() {
        assert_eq!(
            tokens(&TransportPortRange::source(1, 6)),
            [
                "tp_src=1",
                "tp_src=0x0002/0x0001",
                "tp_src=0x0004/0x0001",
                "tp_src=6"
            ]
        );
        assert_eq!(tokens(&TransportPortRange::destination(80, 80)), ["tp_dst=80"]);
        assert_eq!(
            tokens(&TransportPortRange::destination(0, 65535)),
            ["tp_dst=0x0000/0xffff"]
        );
    }

    #[test]
    fn test_masked_ports_cover_range() {
        let ports = TransportPortRange::destination(1000, 1999)
            .masked_ports()
            .unwrap();
        let mut covered = 0u32;
        for m in &ports {
            match m {
                MatchValue::TransportPort { dir, port, mask } => {
                    assert_eq!(*dir, Direction::Destination);
                    assert_eq!(port & mask, 0);
                    covered += u32::from(*mask) + 1;
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(covered, 1000);
    }

    #[test]
    fn test_inverted_range() {
        assert_eq!(
            TransportPortRange::source(7, 3).masked_ports(),
            Err(RangeError::Inverted { start: 7, end: 3 })
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            TransportPortRange::source(1, 6).describe(),
            "TransportPortRange::source(1, 6)"
        );
        assert_eq!(
            TransportPortRange::destination(1000, 1999).describe(),
            "TransportPortRange::destination(1000, 1999)"
        );
    }
}
