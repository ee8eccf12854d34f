//! Builder for Webling filter expressions.
//!
//! Filters are a conjunction of clauses joined by ` AND `. Each clause is
//! built from typed values so string literals are always quoted and
//! escaped, regardless of what the operator passes in.

use std::fmt;

use webling_debtors_api_models::{DebtorState, PeriodId};

/// A single condition inside a [`Filter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `state = "<state>"`
    State(DebtorState),
    /// `$parents.$id = <period>`
    ParentPeriod(PeriodId),
    /// `$children.period.$id = <period>`
    ChildPeriod(PeriodId),
    /// `` `title` IN ("<a>", "<b>") ``
    TitleIn(Vec<String>),
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::State(state) => write!(f, "state = {}", quote(state.as_ref())),
            Self::ParentPeriod(period_id) => write!(f, "$parents.$id = {period_id}"),
            Self::ChildPeriod(period_id) => write!(f, "$children.period.$id = {period_id}"),
            Self::TitleIn(titles) => {
                let quoted: Vec<String> = titles.iter().map(|t| quote(t)).collect();
                write!(f, "`title` IN ({})", quoted.join(", "))
            }
        }
    }
}

/// A conjunction of [`Clause`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    /// Creates an empty filter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clauses: Vec::new(),
        }
    }

    /// Appends a clause.
    #[must_use]
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Open debtors of `period_id`, restricted to `titles` unless the
    /// slice is empty.
    #[must_use]
    pub fn open_debtors(period_id: PeriodId, titles: &[String]) -> Self {
        let filter = Self::new()
            .and(Clause::State(DebtorState::Open))
            .and(Clause::ParentPeriod(period_id));

        if titles.is_empty() {
            filter
        } else {
            filter.and(Clause::TitleIn(titles.to_vec()))
        }
    }

    /// The period group that contains `period_id`.
    #[must_use]
    pub fn period_group_of(period_id: PeriodId) -> Self {
        Self::new().and(Clause::ChildPeriod(period_id))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

/// Wraps `value` in double quotes, escaping backslashes and quotes.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_debtors_with_titles() {
        let titles = vec!["Membership".to_string(), "Donation".to_string()];
        let filter = Filter::open_debtors(PeriodId(42), &titles);
        assert_eq!(
            filter.to_string(),
            r#"state = "open" AND $parents.$id = 42 AND `title` IN ("Membership", "Donation")"#
        );
    }

    #[test]
    fn open_debtors_without_titles_omits_title_clause() {
        let filter = Filter::open_debtors(PeriodId(7), &[]);
        assert_eq!(filter.to_string(), r#"state = "open" AND $parents.$id = 7"#);
    }

    #[test]
    fn period_group_filter() {
        assert_eq!(
            Filter::period_group_of(PeriodId(42)).to_string(),
            "$children.period.$id = 42"
        );
    }

    #[test]
    fn title_literals_are_escaped() {
        let titles = vec![r#"Say "hi""#.to_string(), r"back\slash".to_string()];
        let filter = Filter::new().and(Clause::TitleIn(titles));
        assert_eq!(
            filter.to_string(),
            r#"`title` IN ("Say \"hi\"", "back\\slash")"#
        );
    }
}
