mod calendar_test;
mod health_test;
mod middleware_test;
mod schedule_test;
mod slots_test;
mod time_test;
