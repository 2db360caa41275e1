//! IPv4 range codec.
//!
//! Converts CIDR networks into inclusive `[start, end]` integer ranges and
//! dotted-quad addresses into their big-endian `u32` encoding. Both values
//! are what the store compares against in `? BETWEEN start_ip AND end_ip`.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

use crate::error_handling::GeoError;

/// Inclusive bounds of an IPv4 block.
///
/// `start` is the network address, `end` the network address with every
/// host bit set. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressRange {
    pub start: u32,
    pub end: u32,
}

impl AddressRange {
    /// Returns true if `ip` lies within the range.
    pub fn contains(&self, ip: u32) -> bool {
        self.start <= ip && ip <= self.end
    }

    /// Number of addresses covered. `/0` covers 2^32, hence `u64`.
    pub fn len(&self) -> u64 {
        u64::from(self.end - self.start) + 1
    }

    /// A range always holds at least one address.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Encodes a CIDR network (`a.b.c.d/len`) as an inclusive address range.
///
/// Host bits in the base address are masked off, so `10.0.0.7/24` and
/// `10.0.0.0/24` encode identically.
pub fn encode_cidr(cidr: &str) -> Result<AddressRange, GeoError> {
    let net: Ipv4Net = cidr
        .trim()
        .parse()
        .map_err(|_| GeoError::MalformedCidr(cidr.to_string()))?;

    Ok(AddressRange {
        start: u32::from(net.network()),
        end: u32::from(net.broadcast()),
    })
}

/// Encodes a dotted-quad IPv4 address as `(b0<<24)|(b1<<16)|(b2<<8)|b3`.
pub fn encode_ip(ip: &str) -> Result<u32, GeoError> {
    let addr: Ipv4Addr = ip
        .trim()
        .parse()
        .map_err(|_| GeoError::MalformedAddress(ip.to_string()))?;
    Ok(u32::from(addr))
}

/// Inverse of [`encode_ip`].
pub fn decode_ip(value: u32) -> Ipv4Addr {
    Ipv4Addr::from(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_cidr_slash_24() {
        let range = encode_cidr("10.0.0.0/24").unwrap();
        assert_eq!(range.start, 167772160);
        assert_eq!(range.end, 167772415);
        assert_eq!(range.end - range.start, 255);
        assert_eq!(range.len(), 256);
    }

    #[test]
    fn test_encode_ip_inside_slash_24() {
        let ip = encode_ip("10.0.0.5").unwrap();
        assert_eq!(ip, 167772165);
        assert!(encode_cidr("10.0.0.0/24").unwrap().contains(ip));
        assert!(!encode_cidr("10.0.1.0/24").unwrap().contains(ip));
    }

    #[test]
    fn test_encode_cidr_masks_host_bits() {
        assert_eq!(
            encode_cidr("10.0.0.7/24").unwrap(),
            encode_cidr("10.0.0.0/24").unwrap()
        );
    }

    #[test]
    fn test_encode_cidr_prefix_sizes() {
        for prefix in 0u8..=32 {
            let range = encode_cidr(&format!("203.0.113.77/{}", prefix)).unwrap();
            assert!(range.start <= range.end);
            assert_eq!(range.len(), 1u64 << (32 - prefix));
        }
    }

    #[test]
    fn test_encode_cidr_extremes() {
        let all = encode_cidr("0.0.0.0/0").unwrap();
        assert_eq!(all.start, 0);
        assert_eq!(all.end, u32::MAX);

        let host = encode_cidr("255.255.255.255/32").unwrap();
        assert_eq!(host.start, u32::MAX);
        assert_eq!(host.end, u32::MAX);
    }

    #[test]
    fn test_encode_cidr_rejects_malformed() {
        for bad in [
            "",
            "10.0.0.0",
            "10.0.0.0/33",
            "10.0.0/24",
            "256.0.0.0/8",
            "2001:db8::/32",
            "network",
        ] {
            let err = encode_cidr(bad).unwrap_err();
            assert!(
                matches!(err, GeoError::MalformedCidr(_)),
                "{:?} should be MalformedCidr, got {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_encode_ip_rejects_non_ipv4() {
        for bad in ["", "::1", "10.0.0", "10.0.0.256", "10.0.0.0/24", "localhost"] {
            assert!(matches!(
                encode_ip(bad),
                Err(GeoError::MalformedAddress(_))
            ));
        }
    }

    #[test]
    fn test_ip_round_trip() {
        for ip in ["0.0.0.0", "1.2.3.4", "59.110.190.34", "255.255.255.255"] {
            assert_eq!(decode_ip(encode_ip(ip).unwrap()).to_string(), ip);
        }
    }

    #[test]
    fn test_encode_ip_is_big_endian() {
        assert_eq!(encode_ip("1.2.3.4").unwrap(), 0x01020304);
    }
}
