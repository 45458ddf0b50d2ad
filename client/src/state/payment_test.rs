use super::*;
use social::payment::demo_history;
use time::macros::datetime;

#[test]
fn demo_history_rows_are_formatted() {
    let state = PaymentState { history: demo_history(datetime!(2024-01-15 12:00 UTC)), ..PaymentState::default() };
    let rows = state.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].description, "Premium Community Access");
    assert_eq!(rows[0].amount, "$5.00");
    assert_eq!(rows[0].date, "Jan 15, 2024");
    assert_eq!(rows[1].amount, "$2.00");
    assert_eq!(rows[1].date, "Jan 14, 2024");
}

#[test]
fn blank_description_gets_placeholder() {
    let tx = Transaction {
        id: "pi_1".to_owned(),
        amount: 100,
        currency: "eur".to_owned(),
        status: "succeeded".to_owned(),
        created: datetime!(2024-03-01 00:00 UTC),
        description: String::new(),
    };
    let row = HistoryRow::from(&tx);
    assert_eq!(row.description, "Payment");
    assert_eq!(row.amount, "EUR 1.00");
}
