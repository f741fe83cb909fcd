use std::fmt;

/// The two NVD collections mirrored by this tool.
///
/// Each kind knows its REST endpoint, the shape of its API pages, the
/// section of `syncdate.json` it owns, and the directory it is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Cve,
    CpeMatch,
}

impl RecordKind {
    /// Kinds in the order a full or incremental sync processes them.
    ///
    /// Match criteria go first so a CVE never references criteria that the
    /// mirror does not have yet.
    pub const SYNC_ORDER: [RecordKind; 2] = [RecordKind::CpeMatch, RecordKind::Cve];

    pub fn endpoint(&self) -> &'static str {
        match self {
            RecordKind::Cve => "rest/json/cves/2.0",
            RecordKind::CpeMatch => "rest/json/cpematch/2.0",
        }
    }

    /// Key of the result array in an API page
    pub fn page_key(&self) -> &'static str {
        match self {
            RecordKind::Cve => "vulnerabilities",
            RecordKind::CpeMatch => "matchStrings",
        }
    }

    /// Key of the inner object of each page item
    pub fn object_key(&self) -> &'static str {
        match self {
            RecordKind::Cve => "cve",
            RecordKind::CpeMatch => "matchString",
        }
    }

    pub fn id_field(&self) -> &'static str {
        match self {
            RecordKind::Cve => "id",
            RecordKind::CpeMatch => "matchCriteriaId",
        }
    }

    /// Query parameter selecting a single record
    pub fn id_param(&self) -> &'static str {
        match self {
            RecordKind::Cve => "cveId",
            RecordKind::CpeMatch => "matchCriteriaId",
        }
    }

    /// Section of `syncdate.json` holding this kind's window
    pub fn state_section(&self) -> &'static str {
        self.page_key()
    }

    /// Top-level directory of the mirror holding this kind
    pub fn storage_root(&self) -> &'static str {
        match self {
            RecordKind::Cve => "cve",
            RecordKind::CpeMatch => "cpematch",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RecordKind::Cve => "CVE",
            RecordKind::CpeMatch => "CPE Match Criteria",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_order_puts_match_criteria_first() {
        assert_eq!(
            RecordKind::SYNC_ORDER,
            [RecordKind::CpeMatch, RecordKind::Cve]
        );
    }

    #[test]
    fn test_cve_api_shape() {
        let kind = RecordKind::Cve;
        assert_eq!(kind.endpoint(), "rest/json/cves/2.0");
        assert_eq!(kind.page_key(), "vulnerabilities");
        assert_eq!(kind.object_key(), "cve");
        assert_eq!(kind.id_field(), "id");
        assert_eq!(kind.storage_root(), "cve");
    }

    #[test]
    fn test_cpe_match_api_shape() {
        let kind = RecordKind::CpeMatch;
        assert_eq!(kind.endpoint(), "rest/json/cpematch/2.0");
        assert_eq!(kind.page_key(), "matchStrings");
        assert_eq!(kind.object_key(), "matchString");
        assert_eq!(kind.id_field(), "matchCriteriaId");
        assert_eq!(kind.id_param(), "matchCriteriaId");
        assert_eq!(kind.state_section(), "matchStrings");
        assert_eq!(kind.storage_root(), "cpematch");
    }

    #[test]
    fn test_display() {
        assert_eq!(RecordKind::Cve.to_string(), "CVE");
        assert_eq!(RecordKind::CpeMatch.to_string(), "CPE Match Criteria");
    }
}
