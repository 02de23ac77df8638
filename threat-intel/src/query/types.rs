//! Enumerated filter values and their wire strings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a filter enum whose variants serialize to fixed wire strings.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire representation sent to the API
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Wire strings of every variant, for schemas and messages
            pub fn wire_values() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Threat feed category
    ThreatCategory {
        Ransomware => "Ransomware",
        DataBreach => "Data Breach",
        DataLeak => "Data Leak",
        Malware => "Malware",
        DdosAttack => "DDoS Attack",
        Phishing => "Phishing",
        ComboList => "Combo List",
        Logs => "Logs",
        Defacement => "Defacement",
        Alert => "Alert",
        Vulnerability => "Vulnerability",
    }
}

wire_enum! {
    /// Which victim attribute a threat feed filter targets
    VictimKey {
        Country => "Country",
        Industry => "Industry",
        Organization => "Organization",
        Site => "Site",
        Region => "Region",
        Subregion => "Subregion",
    }
}

wire_enum! {
    /// Threat type accepted by the legacy IOC listing
    IocThreatType {
        BotnetCc => "botnet_cc",
        MalwareDownload => "malware_download",
        Malware => "Malware",
        Clean => "Clean",
        General => "general",
        Suspicious => "Suspicious",
        Payload => "payload",
    }
}

wire_enum! {
    /// Indicator kind accepted by the v2 IOC listing
    IocType {
        Ipv4 => "ipv4",
        Ipv6 => "ipv6",
        IpPort => "ip:port",
        Domain => "domain",
        Url => "url",
        Md5 => "md5",
        Sha1 => "sha1",
        Sha256 => "sha256",
        Sha3 => "sha3",
    }
}

wire_enum! {
    /// Coarse trust rating attached to an IOC
    ConfidenceLevel {
        Limited => "limited",
        Moderate => "moderate",
        Elevated => "elevated",
        High => "high",
        Other => "other",
    }
}

wire_enum! {
    /// Encoding requested for threat images
    ImageType {
        Base64 => "base64",
        Blob => "blob",
    }
}
