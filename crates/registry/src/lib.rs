//! Identifier registry for error locations.
//!
//! Provides the closed vocabularies an error location is built from:
//! [`FunctionId`] (the API call being validated), [`RefPageId`] (the reference
//! page the check belongs to) and [`FieldId`] (a member or parameter). All
//! three are generated from `spec/registry.jsonc` at build time and carry an
//! `Empty` sentinel with raw value 0.
//!
//! Name lookups are total: every value, `Empty` included, maps to a
//! `'static` name, so rendering never has to handle a missing entry.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

include!(concat!(env!("OUT_DIR"), "/generated_ids.rs"));

/// Error returned when parsing a name that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} name: {name:?}")]
pub struct UnknownName {
    /// Which vocabulary was searched (`"function"`, `"reference page"` or `"field"`).
    pub kind: &'static str,
    /// The name that was not found.
    pub name: String,
}

// ─── Shared trait impls ─────────────────────────────────────────────────────
// The three vocabularies only differ in their generated tables, so Display,
// FromStr and name-based serde are stamped out once per type.

macro_rules! registry_impls {
    ($ty:ident, $kind:literal) => {
        impl $ty {
            /// Returns `true` for the `Empty` sentinel.
            pub const fn is_empty(self) -> bool {
                matches!(self, Self::Empty)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s).ok_or_else(|| UnknownName {
                    kind: $kind,
                    name: s.to_string(),
                })
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let name = String::deserialize(deserializer)?;
                name.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

registry_impls!(FunctionId, "function");
registry_impls!(RefPageId, "reference page");
registry_impls!(FieldId, "field");

#[cfg(test)]
mod tests {
    use super::*;

    // ── Name tables ─────────────────────────────────────────────────────

    #[test]
    fn empty_sentinels_have_names() {
        assert_eq!(FunctionId::Empty.as_str(), "Empty");
        assert_eq!(RefPageId::Empty.as_str(), "Empty");
        assert_eq!(FieldId::Empty.as_str(), "Empty");
    }

    #[test]
    fn default_is_empty() {
        assert!(FunctionId::default().is_empty());
        assert!(RefPageId::default().is_empty());
        assert!(FieldId::default().is_empty());
        assert!(!FieldId::srcAccessMask.is_empty());
    }

    #[test]
    fn names_match_variants() {
        assert_eq!(FunctionId::vkCmdPipelineBarrier.as_str(), "vkCmdPipelineBarrier");
        assert_eq!(RefPageId::VkImageMemoryBarrier.as_str(), "VkImageMemoryBarrier");
        assert_eq!(FieldId::pImageMemoryBarriers.as_str(), "pImageMemoryBarriers");
    }

    #[test]
    fn c_str_matches_str_for_every_value() {
        for id in FunctionId::ALL {
            assert_eq!(id.as_c_str().to_str().unwrap(), id.as_str());
        }
        for id in RefPageId::ALL {
            assert_eq!(id.as_c_str().to_str().unwrap(), id.as_str());
        }
        for id in FieldId::ALL {
            assert_eq!(id.as_c_str().to_str().unwrap(), id.as_str());
        }
    }

    #[test]
    fn all_is_in_raw_order() {
        assert_eq!(FieldId::ALL.len(), FieldId::COUNT);
        for (i, id) in FieldId::ALL.iter().enumerate() {
            assert_eq!(id.as_raw() as usize, i);
            assert_eq!(FieldId::from_raw(id.as_raw()), Some(*id));
        }
        assert_eq!(FieldId::ALL[0], FieldId::Empty);
    }

    #[test]
    fn raw_values_follow_registry_order() {
        assert_eq!(FunctionId::vkQueueSubmit.as_raw(), 1);
        assert_eq!(FunctionId::vkSignalSemaphore.as_raw(), 16);
        assert_eq!(RefPageId::VkMemoryBarrier.as_raw(), 1);
        assert_eq!(RefPageId::VkSemaphoreSignalInfo.as_raw(), 23);
        assert_eq!(FieldId::oldLayout.as_raw(), 1);
        assert_eq!(FieldId::pDependencies.as_raw(), 37);
    }

    #[test]
    fn reference_pages_include_commands() {
        let page: RefPageId = "vkCmdPipelineBarrier2KHR".parse().unwrap();
        assert_eq!(page, RefPageId::vkCmdPipelineBarrier2KHR);
        assert_eq!(page.as_str(), FunctionId::vkCmdPipelineBarrier2KHR.as_str());
        let err = "VkNope".parse::<RefPageId>().unwrap_err();
        assert_eq!(err.to_string(), "unknown reference page name: \"VkNope\"");
    }

    #[test]
    fn from_raw_out_of_range() {
        assert_eq!(FunctionId::from_raw(FunctionId::COUNT as u32), None);
        assert_eq!(RefPageId::from_raw(u32::MAX), None);
    }

    #[test]
    fn from_name_round_trips_every_value() {
        for id in FunctionId::ALL {
            assert_eq!(FunctionId::from_name(id.as_str()), Some(id));
        }
        for id in RefPageId::ALL {
            assert_eq!(RefPageId::from_name(id.as_str()), Some(id));
        }
    }

    // ── FromStr / Display ───────────────────────────────────────────────

    #[test]
    fn parse_known_name() {
        let id: FunctionId = "vkQueueSubmit".parse().unwrap();
        assert_eq!(id, FunctionId::vkQueueSubmit);
        assert_eq!(id.to_string(), "vkQueueSubmit");
    }

    #[test]
    fn parse_unknown_name() {
        let err = "pNope".parse::<FieldId>().unwrap_err();
        assert_eq!(err.kind, "field");
        assert_eq!(err.name, "pNope");
        assert_eq!(err.to_string(), "unknown field name: \"pNope\"");
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("vkqueuesubmit".parse::<FunctionId>().is_err());
    }

    // ── Serde ───────────────────────────────────────────────────────────

    #[test]
    fn serializes_as_name() {
        let json = serde_json::to_string(&RefPageId::VkSubmitInfo).unwrap();
        assert_eq!(json, "\"VkSubmitInfo\"");
    }

    #[test]
    fn deserializes_from_name() {
        let id: FieldId = serde_json::from_str("\"srcAccessMask\"").unwrap();
        assert_eq!(id, FieldId::srcAccessMask);
    }

    #[test]
    fn deserialize_rejects_unknown_name() {
        let err = serde_json::from_str::<FunctionId>("\"vkDoesNotExist\"").unwrap_err();
        assert!(err.to_string().contains("unknown function name"));
    }
}
