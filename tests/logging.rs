mod common;

use std::sync::Mutex;

use authorizenet::{core::transaction::GatewayTransaction, gateway::arb::ArbSubscription};
use common::{MockTransport, config};
use log::{Level, LevelFilter, Log, Metadata, Record};

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

#[test]
fn unreadable_reply_is_reported_once() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut transport = MockTransport::new();
    transport
        .expect_post()
        .times(1)
        .returning(|_| Ok("<html><body>Bad gateway".to_string()));

    let mut subscription = ArbSubscription::new(&config(false, false), [("x_amount", "9.99")]);
    subscription.execute(&transport).unwrap();

    let records = LOGGER.records.lock().unwrap();
    let reported: Vec<&(Level, String)> = records
        .iter()
        .filter(|(level, _)| *level <= Level::Warn)
        .collect();

    assert_eq!(reported.len(), 1, "records: {:?}", *records);
    assert_eq!(reported[0].0, Level::Warn);
    assert!(reported[0].1.starts_with("Recurring billing reply could not be decoded"));
}
