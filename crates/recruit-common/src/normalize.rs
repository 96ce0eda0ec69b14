//! Text normalization
//!
//! Every string that leaves a field parser goes through [`normalize`] so that
//! dictionary lookups and stored values do not depend on how the spreadsheet
//! producer encoded them (full-width letters, ligatures, non-breaking spaces).

use unicode_normalization::UnicodeNormalization;

/// Normalize text to Unicode form NFKC (compatibility decomposition followed
/// by canonical composition). See <http://unicode.org/reports/tr15/>.
pub fn normalize(text: &str) -> String {
    text.nfkc().collect()
}
