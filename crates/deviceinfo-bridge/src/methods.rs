// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The closed set of methods the bridge answers.

/// A supported method. Names outside this set are not implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Return the formatted build-property block.
    GetDeviceInfo,
}

impl Method {
    pub const ALL: [Method; 1] = [Method::GetDeviceInfo];

    /// Wire name of the method.
    pub const fn name(self) -> &'static str {
        match self {
            Method::GetDeviceInfo => "getDeviceInfo",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_name_resolves() {
        assert_eq!(Method::from_name("getDeviceInfo"), Some(Method::GetDeviceInfo));
    }

    #[test]
    fn near_misses_do_not_resolve() {
        for name in [
            "",
            "GetDeviceInfo",
            "getdeviceinfo",
            " getDeviceInfo",
            "getDeviceInfo ",
            "getDeviceInfo\n",
            "unknownMethod",
        ] {
            assert_eq!(Method::from_name(name), None, "{name:?}");
        }
    }
}
