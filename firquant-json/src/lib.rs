//! firquant-json contains the JSON schemas used by firquant for filter input
//! files and for its machine-readable reports.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// Scaling policy.
///
/// This enum lists the ways in which the multiplier applied to the real-valued
/// taps can be chosen.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Policy {
    /// Scale so that the reconstructed tap sum (the DC gain) equals
    /// `2^bit_width`.
    ///
    /// This is the policy used for low-pass filters.
    DcGain,
    /// Scale so that the largest magnitude tap equals `2^(bit_width - 1) - 1`.
    ///
    /// This is the policy used for high-pass, band-pass and band-stop filters,
    /// whose DC gain is not a useful normalization.
    PeakMagnitude,
}

/// Tap layout.
///
/// This enum describes how a coefficient list stores a symmetric FIR filter.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// One half of a symmetric odd-length filter.
    ///
    /// The list holds the taps `h[0], ..., h[c]`, where `h[c]` is the centre
    /// tap, stored last. Every tap except the centre appears twice in the
    /// complete filter.
    #[default]
    MirroredHalf,
    /// The complete filter.
    ///
    /// The list has odd length and its centre tap is at `(len - 1) / 2`.
    Full,
}

macro_rules! impl_str_conv {
    ($ty:ty, $($s:expr => $v:ident),*) => {
        impl std::str::FromStr for $ty {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, ()> {
                Ok(match s {
                    $(
                        $s => <$ty>::$v,
                    )*
                        _ => return Err(()),
                })
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
                write!(f, "{}", match self {
                    $(
                        <$ty>::$v => $s,
                    )*
                })
            }
        }
    }
}

impl_str_conv!(Policy,
               "dc-gain" => DcGain,
               "peak-magnitude" => PeakMagnitude);

impl_str_conv!(Layout,
               "mirrored-half" => MirroredHalf,
               "full" => Full);

/// Filter input JSON schema.
///
/// An input file contains a JSON array of these objects. Each one describes a
/// filter to quantize.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Filter name.
    pub name: String,
    /// Real-valued filter taps.
    pub coefficients: Vec<f64>,
    /// Bit budget.
    ///
    /// If this is not specified, the firquant default is used.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bit_width: Option<u32>,
    /// Scaling policy.
    pub policy: Policy,
    /// Tap layout.
    ///
    /// If this is not specified, [`Layout::MirroredHalf`] is used.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub layout: Option<Layout>,
}

/// Quantized filter report JSON schema.
///
/// This contains the result of quantizing one filter, together with the
/// intermediate values that allow checking it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuantizedFilter {
    /// Filter name.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    /// Scaling policy.
    pub policy: Policy,
    /// Tap layout.
    pub layout: Layout,
    /// Bit budget.
    pub bit_width: u32,
    /// Value that the multiplier normalizes.
    ///
    /// For [`Policy::DcGain`] this is the reconstructed tap sum of the input.
    /// For [`Policy::PeakMagnitude`] it is the largest tap magnitude.
    pub scale_reference: f64,
    /// Multiplier applied to the input taps.
    pub multiplier: f64,
    /// Quantized taps, in the same layout as the input.
    pub coefficients: Vec<i64>,
    /// Reconstructed tap sum of the quantized filter.
    pub checksum: i64,
    /// Value that the checksum should approximate.
    ///
    /// This is only present for [`Policy::DcGain`].
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub target: Option<i64>,
    /// Complete filter obtained by mirroring the quantized taps.
    ///
    /// This is only present when the expansion was requested and the layout is
    /// [`Layout::MirroredHalf`].
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expanded: Option<Vec<i64>>,
}

/// Hardware preset JSON schema.
///
/// This describes one of the coefficient sets that can be loaded into the FPGA
/// FIR.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Preset {
    /// Preset index, as used by the FPGA configuration tool.
    pub index: usize,
    /// Preset name.
    pub name: String,
    /// Stored taps (mirrored half).
    pub coefficients: Vec<i32>,
    /// Reconstructed tap sum.
    pub sum: i64,
    /// Whether all the taps fit the FIR coefficient register.
    pub fits_register: bool,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn str_conv() {
        assert_eq!("dc-gain".parse::<Policy>(), Ok(Policy::DcGain));
        assert_eq!("peak-magnitude".parse::<Policy>(), Ok(Policy::PeakMagnitude));
        assert_eq!("low-pass".parse::<Policy>(), Err(()));
        assert_eq!("full".parse::<Layout>(), Ok(Layout::Full));
        assert_eq!(Layout::MirroredHalf.to_string(), "mirrored-half");
        assert_eq!(Policy::PeakMagnitude.to_string(), "peak-magnitude");
    }

    #[test]
    fn filter_spec_defaults() {
        let spec: FilterSpec = serde_json::from_str(
            r#"{"name": "lp", "coefficients": [1.0, 2.0], "policy": "dc-gain"}"#,
        )
        .unwrap();
        assert_eq!(spec.bit_width, None);
        assert_eq!(spec.layout, None);
        assert_eq!(spec.policy, Policy::DcGain);
        assert_eq!(spec.coefficients, vec![1.0, 2.0]);
    }

    #[test]
    fn quantized_filter_skips_missing() {
        let report = QuantizedFilter {
            name: None,
            policy: Policy::PeakMagnitude,
            layout: Layout::Full,
            bit_width: 4,
            scale_reference: 1.0,
            multiplier: 7.0,
            coefficients: vec![7],
            checksum: 7,
            target: None,
            expanded: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"policy":"peak-magnitude","layout":"full","bit_width":4,"scale_reference":1.0,"multiplier":7.0,"coefficients":[7],"checksum":7}"#
        );
    }
}
