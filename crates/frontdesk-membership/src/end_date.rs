use chrono::{Days, Months, NaiveDate};

use frontdesk_data::{Error, PlanType};

/// How far a plan reaches from its join date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    Days(u64),
    Months(u32),
}

impl From<PlanType> for Term {
    fn from(plan: PlanType) -> Self {
        match plan {
            PlanType::OneDay => Term::Days(1),
            PlanType::OneWeek => Term::Days(7),
            PlanType::OneMonth => Term::Months(1),
            PlanType::ThreeMonths => Term::Months(3),
            PlanType::SixMonths => Term::Months(6),
            PlanType::OneYear => Term::Months(12),
        }
    }
}

/// Calculate the last day of a membership.
///
/// Month based plans keep the day of the month and clamp to the
/// end of shorter months, so a plan started on Jan 31 ends on the
/// last day of February and a yearly plan started on Feb 29 ends
/// on Feb 28 of a non leap year.
pub fn compute_end_date(join_date: NaiveDate, plan: PlanType) -> Result<NaiveDate, Error> {
    let end = match Term::from(plan) {
        Term::Days(days) => join_date.checked_add_days(Days::new(days)),
        Term::Months(months) => join_date.checked_add_months(Months::new(months)),
    };
    end.ok_or_else(|| {
        Error::validation(format!(
            "join date {} is out of range for plan {}",
            join_date, plan
        ))
    })
}
