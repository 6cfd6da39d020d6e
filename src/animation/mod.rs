pub(crate) mod schedule;
