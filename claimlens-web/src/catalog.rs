//! Static trusted-source catalog.
//!
//! Per-domain allow-lists for evergreen corroboration and a shared newswire
//! list for real-time coverage. The lists are process-wide constants, read
//! concurrently and never mutated at runtime; lookups cannot fail — any
//! domain without a dedicated list falls back to the General list.

use claimlens_common::{DomainCategory, RecencyCategory};

pub const GENERAL_TRUSTED_SITES: &[&str] = &[
    "wikipedia.org",
    "britannica.com",
    "nationalgeographic.com",
    "apnews.com",
    "reuters.com",
    "bbc.com/news",
    "nytimes.com",
    "wsj.com",
    "factcheck.org",
    "snopes.com",
    "politifact.com",
];

pub const HEALTH_TRUSTED_SITES: &[&str] = &[
    // Indian government / health organizations
    "mohfw.gov.in",
    "icmr.gov.in",
    "aiims.edu",
    "nhp.gov.in",
    "phfi.org",
    "nihfw.org",
    "indianpediatrics.net",
    "fssai.gov.in",
    "mciindia.org",
    "ncdc.gov.in",
    "tmc.gov.in",
    "pgimer.edu.in",
    "sctimst.ac.in",
    // International health organizations and reputable sources
    "cdc.gov",
    "mayoclinic.org",
    "medlineplus.gov",
    "fda.gov",
    "health.gov",
    "webmd.com",
    "healthline.com",
    "nhs.uk",
    "health.harvard.edu",
    "heart.org",
    "hopkinsmedicine.org",
    "medicalnewtoday.com",
    "nia.nih.gov",
    "thelancet.com",
    "wikipedia.org",
    "everydayhealth.com",
    "clevelandclinic.org",
    "onlymyhealth.com",
    "health.economictimes.indiatimes.com",
    "maxhealthcare.in",
    "netmeds.com",
    "1mg.com",
    "cabidigitallibrary.org",
];

pub const FINANCE_TRUSTED_SITES: &[&str] = &[
    "rbi.org.in",
    "sebi.gov.in",
    "bseindia.com",
    "nseindia.com",
    "moneycontrol.com",
    "economictimes.indiatimes.com",
    "business-standard.com",
    "financialexpress.com",
    "livemint.com",
    "businesstoday.in",
    "crisil.com",
    "icra.in",
    "tradingeconomics.com",
    "investindia.gov.in",
    "ibef.org",
    "pib.gov.in",
    "taxmann.com",
    "caindia.org",
    "policybazaar.com",
    "india.gov.in",
    // general finance sources
    "investopedia.com",
    "bloomberg.com",
    "reuters.com",
    "wsj.com",
    "ft.com",
    "cnbc.com",
    "fidelity.com",
    "zacks.com",
    "fool.com",
    "wikipedia.org",
];

/// Real-time coverage is newswire-driven, so one wire-service/broadcaster
/// list serves every domain.
pub const REALTIME_TRUSTED_SITES: &[&str] = &[
    "apnews.com",
    "reuters.com",
    "bbc.com/news",
    "cnn.com",
    "theguardian.com",
    "aljazeera.com",
    "abcnews.go.com",
    "nbcnews.com",
    "cbsnews.com",
    "ndtv.com",
    "thehindu.com",
    "indianexpress.com",
    "hindustantimes.com",
    "timesofindia.indiatimes.com",
];

/// Mapping from (domain, recency) to the trusted hostname list.
pub struct TrustCatalog;

impl TrustCatalog {
    pub fn trusted_sites(
        domain: DomainCategory,
        recency: RecencyCategory,
    ) -> &'static [&'static str] {
        match recency {
            RecencyCategory::Realtime => REALTIME_TRUSTED_SITES,
            RecencyCategory::Evergreen => match domain {
                DomainCategory::Health => HEALTH_TRUSTED_SITES,
                DomainCategory::Finance => FINANCE_TRUSTED_SITES,
                DomainCategory::General | DomainCategory::Other => GENERAL_TRUSTED_SITES,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_domains_fall_back_to_general() {
        assert_eq!(
            TrustCatalog::trusted_sites(DomainCategory::Other, RecencyCategory::Evergreen),
            GENERAL_TRUSTED_SITES
        );
        // Parsing an arbitrary label lands in Other, which still resolves.
        let domain = DomainCategory::parse("Astrology");
        assert_eq!(
            TrustCatalog::trusted_sites(domain, RecencyCategory::Evergreen),
            GENERAL_TRUSTED_SITES
        );
    }

    #[test]
    fn realtime_uses_the_wire_list_for_every_domain() {
        for domain in [
            DomainCategory::Health,
            DomainCategory::Finance,
            DomainCategory::General,
            DomainCategory::Other,
        ] {
            assert_eq!(
                TrustCatalog::trusted_sites(domain, RecencyCategory::Realtime),
                REALTIME_TRUSTED_SITES
            );
        }
    }

    #[test]
    fn lists_are_non_empty() {
        assert!(!GENERAL_TRUSTED_SITES.is_empty());
        assert!(!HEALTH_TRUSTED_SITES.is_empty());
        assert!(!FINANCE_TRUSTED_SITES.is_empty());
        assert!(!REALTIME_TRUSTED_SITES.is_empty());
    }
}
