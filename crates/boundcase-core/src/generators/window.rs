//! Date and time window cases.
//!
//! Valid cases sit at the window midpoint and one step inside each edge.
//! Invalid cases step past the far edge, land on the wrong side of the
//! anchor, break the format, or are not strings at all.

use chrono::{Days, NaiveDateTime, NaiveTime, Timelike};

use super::{GenContext, LeafGenerator};
use crate::error::GenerateError;
use crate::oracle::{case, TestCase};
use crate::schema::{DateWindow, Direction, Schema, TimeWindow};
use crate::value::Value;

const ONE_DAY: Days = Days::new(1);
const SECONDS_PER_DAY: u32 = 86_400;

#[derive(Debug, Default, Clone, Copy)]
pub struct DateWindowGenerator;

impl DateWindowGenerator {
    fn window<'s>(schema: &'s Schema, ctx: &GenContext) -> Result<&'s DateWindow, GenerateError> {
        match schema {
            Schema::DateWindow(window) => Ok(window),
            other => Err(ctx.mismatch("date_window", other)),
        }
    }
}

fn step(instant: NaiveDateTime, forward: bool) -> Option<NaiveDateTime> {
    if forward {
        instant.checked_add_days(ONE_DAY)
    } else {
        instant.checked_sub_days(ONE_DAY)
    }
}

impl LeafGenerator for DateWindowGenerator {
    fn valid(&self, schema: &Schema, ctx: &mut GenContext) -> Result<Vec<TestCase>, GenerateError> {
        let window = Self::window(schema, ctx)?;
        let Some(limit) = window.limit() else {
            return Ok(Vec::new());
        };
        let label = format!("{} {}", window.direction.as_str(), window.span_label());
        // Stepping from the anchor towards the limit moves back in time for
        // `before` windows.
        let towards_limit = window.direction == Direction::After;

        let mut candidates = vec![(
            format!("valid date {} (window midpoint)", label),
            Some(window.anchor + (limit - window.anchor) / 2),
        )];
        candidates.push((
            format!("valid date {} (one day inside the anchor)", label),
            step(window.anchor, towards_limit),
        ));
        candidates.push((
            format!("valid date {} (one day inside the limit)", label),
            step(limit, !towards_limit),
        ));

        Ok(candidates
            .into_iter()
            .filter_map(|(desc, instant)| Some((desc, instant?)))
            .map(|(desc, instant)| case(schema, desc, Value::String(window.render(instant))))
            .collect())
    }

    fn invalid(
        &self,
        schema: &Schema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        let window = Self::window(schema, ctx)?;
        let label = format!("{} {}", window.direction.as_str(), window.span_label());
        let towards_limit = window.direction == Direction::After;

        let mut cases = Vec::new();
        if let Some(beyond) = window.limit().and_then(|limit| step(limit, towards_limit)) {
            cases.push(case(
                schema,
                format!("date {} one day beyond the window limit", label),
                Value::String(window.render(beyond)),
            ));
        }
        if let Some(wrong_side) = step(window.anchor, !towards_limit) {
            cases.push(case(
                schema,
                format!("date {} on the wrong side of the anchor", label),
                Value::String(window.render(wrong_side)),
            ));
        }
        cases.push(case(
            schema,
            format!("malformed date for {} using {}", label, window.format),
            Value::from("invalid-date-format"),
        ));
        cases.push(case(
            schema,
            "number instead of date string",
            Value::from(20_240_115i64),
        ));
        Ok(cases)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TimeWindowGenerator;

impl TimeWindowGenerator {
    fn window<'s>(schema: &'s Schema, ctx: &GenContext) -> Result<&'s TimeWindow, GenerateError> {
        match schema {
            Schema::TimeWindow(window) => Ok(window),
            other => Err(ctx.mismatch("time_window", other)),
        }
    }
}

fn at_second(seconds: u32) -> Option<NaiveTime> {
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

impl LeafGenerator for TimeWindowGenerator {
    fn valid(&self, schema: &Schema, ctx: &mut GenContext) -> Result<Vec<TestCase>, GenerateError> {
        let window = Self::window(schema, ctx)?;
        let boundary = window.time.num_seconds_from_midnight();
        // Accepted seconds form the half-open day segment on one side of the boundary.
        let (first, last) = match window.direction {
            Direction::Before => (0, boundary.checked_sub(1)),
            Direction::After => (boundary + 1, Some(SECONDS_PER_DAY - 1)),
        };
        let Some(last) = last.filter(|&last| last >= first) else {
            return Ok(Vec::new());
        };
        let label = format!("{} {}", window.direction.as_str(), window.time);

        let inner_edge = match window.direction {
            Direction::Before => last,
            Direction::After => first,
        };
        let outer_edge = match window.direction {
            Direction::Before => first + 1,
            Direction::After => last - 1,
        };
        let candidates = [
            (format!("valid time {} (window midpoint)", label), first + (last - first) / 2),
            (format!("valid time {} (one second inside the boundary)", label), inner_edge),
            (format!("valid time {} (one second inside the day edge)", label), outer_edge),
        ];

        Ok(candidates
            .into_iter()
            .filter_map(|(desc, seconds)| Some((desc, at_second(seconds)?)))
            .map(|(desc, time)| case(schema, desc, Value::String(window.render(time))))
            .collect())
    }

    fn invalid(
        &self,
        schema: &Schema,
        ctx: &mut GenContext,
    ) -> Result<Vec<TestCase>, GenerateError> {
        let window = Self::window(schema, ctx)?;
        let boundary = window.time.num_seconds_from_midnight();
        let label = format!("{} {}", window.direction.as_str(), window.time);

        let wrong_side = match window.direction {
            Direction::Before => boundary.checked_add(1).filter(|&s| s < SECONDS_PER_DAY),
            Direction::After => boundary.checked_sub(1),
        };

        let mut cases = vec![case(
            schema,
            format!("time exactly at the boundary ({})", label),
            Value::String(window.render(window.time)),
        )];
        if let Some(time) = wrong_side.and_then(at_second) {
            cases.push(case(
                schema,
                format!("time on the wrong side of the boundary ({})", label),
                Value::String(window.render(time)),
            ));
        }
        cases.push(case(
            schema,
            format!("malformed time for {} using {}", label, window.format),
            Value::from("invalid-time-format"),
        ));
        cases.push(case(schema, "number instead of time string", Value::from(1230i64)));
        Ok(cases)
    }
}
