//! Flag tokens for [MatchValue::connection_tracking_state](super::MatchValue::connection_tracking_state)
//! and [MatchValue::tcp_flags](super::MatchValue::tcp_flags).
use std::fmt::{Display, Formatter};

macro_rules! flag_tokens {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $token:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $token),+
                }
            }

            /// `+flag`, the flag must be set.
            pub fn set(self) -> String {
                format!("+{}", self.as_str())
            }

            /// `-flag`, the flag must be clear.
            pub fn unset(self) -> String {
                format!("-{}", self.as_str())
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

flag_tokens! {
    /// Connection tracking states, see `ovs-fields(7)`.
    CtState {
        New => "new",
        Established => "est",
        Related => "rel",
        Reply => "rpl",
        Invalid => "inv",
        Tracked => "trk",
    }
}

flag_tokens! {
    /// RFC 793 TCP flags.
    TcpFlag {
        Urg => "urg",
        Ack => "ack",
        Psh => "psh",
        Rst => "rst",
        Syn => "syn",
        Fin => "fin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_tokens() {
        assert_eq!(CtState::Tracked.set(), "+trk");
        assert_eq!(CtState::Established.unset(), "-est");
        assert_eq!(CtState::Reply.to_string(), "rpl");
        assert_eq!(TcpFlag::Syn.set(), "+syn");
        assert_eq!(TcpFlag::Ack.unset(), "-ack");
        assert_eq!(TcpFlag::Psh.as_str(), "psh");
    }
}
