//! Search and facet filters over fetched listings.
//!
//! Everything here is a pure function of the listing and the filter state.
//! Empty search text and `None` facets match everything. Search text is
//! matched as typed, surrounding whitespace included.

use crate::models::{InvestorProfile, StartupProfile};
use std::collections::{BTreeSet, HashSet};

fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle_lower))
}

fn search_term(search: &str) -> Option<String> {
    (!search.is_empty()).then(|| search.to_lowercase())
}

fn facet(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Sorted, de-duplicated, non-empty values.
pub fn unique_options<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Filter state of the investor-side startup listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupFilter {
    pub search: String,
    pub industry: Option<String>,
    pub funding_stage: Option<String>,
}

impl StartupFilter {
    pub fn matches(&self, startup: &StartupProfile) -> bool {
        let matches_search = match search_term(&self.search) {
            None => true,
            Some(term) => {
                contains_ci(Some(&startup.company_name), &term)
                    || contains_ci(startup.industry.as_deref(), &term)
                    || contains_ci(startup.funding_stage.as_deref(), &term)
            }
        };

        let matches_industry =
            facet(&self.industry).map_or(true, |want| startup.industry.as_deref() == Some(want));
        let matches_stage = facet(&self.funding_stage)
            .map_or(true, |want| startup.funding_stage.as_deref() == Some(want));

        matches_search && matches_industry && matches_stage
    }

    /// Matching startups whose account id is not in `hidden`, in input order.
    pub fn apply<'a>(
        &self,
        startups: &'a [StartupProfile],
        hidden: &HashSet<i64>,
    ) -> Vec<&'a StartupProfile> {
        startups
            .iter()
            .filter(|s| !hidden.contains(&s.user_id))
            .filter(|s| self.matches(s))
            .collect()
    }

    pub fn industry_options(startups: &[StartupProfile]) -> Vec<String> {
        unique_options(startups.iter().filter_map(|s| s.industry.as_deref()))
    }

    pub fn funding_stage_options(startups: &[StartupProfile]) -> Vec<String> {
        unique_options(startups.iter().filter_map(|s| s.funding_stage.as_deref()))
    }
}

/// Filter state of the startup-side investor listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvestorFilter {
    pub search: String,
    /// Must be one of the investor's `investment_stages`.
    pub stage: Option<String>,
    /// Must be one of the investor's `industry_focus` entries.
    pub industry: Option<String>,
    pub check_size: Option<String>,
}

impl InvestorFilter {
    pub fn matches(&self, investor: &InvestorProfile) -> bool {
        let matches_search = match search_term(&self.search) {
            None => true,
            Some(term) => {
                contains_ci(Some(&investor.full_name), &term)
                    || contains_ci(investor.firm_name.as_deref(), &term)
                    || contains_ci(investor.investor_type.as_deref(), &term)
            }
        };

        let matches_stage = facet(&self.stage)
            .map_or(true, |want| investor.investment_stages.iter().any(|s| s == want));
        let matches_industry = facet(&self.industry)
            .map_or(true, |want| investor.industry_focus.iter().any(|i| i == want));
        let matches_check_size = facet(&self.check_size)
            .map_or(true, |want| investor.check_size_range.as_deref() == Some(want));

        matches_search && matches_stage && matches_industry && matches_check_size
    }

    pub fn apply<'a>(
        &self,
        investors: &'a [InvestorProfile],
        hidden: &HashSet<i64>,
    ) -> Vec<&'a InvestorProfile> {
        investors
            .iter()
            .filter(|i| !hidden.contains(&i.user_id))
            .filter(|i| self.matches(i))
            .collect()
    }

    pub fn stage_options(investors: &[InvestorProfile]) -> Vec<String> {
        unique_options(
            investors
                .iter()
                .flat_map(|i| i.investment_stages.iter().map(String::as_str)),
        )
    }

    pub fn industry_options(investors: &[InvestorProfile]) -> Vec<String> {
        unique_options(
            investors
                .iter()
                .flat_map(|i| i.industry_focus.iter().map(String::as_str)),
        )
    }

    pub fn check_size_options(investors: &[InvestorProfile]) -> Vec<String> {
        unique_options(investors.iter().filter_map(|i| i.check_size_range.as_deref()))
    }
}
