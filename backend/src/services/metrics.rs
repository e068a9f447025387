use lazy_static::lazy_static;
use prometheus::{register_counter, register_counter_vec, Counter, CounterVec};

lazy_static! {
    pub static ref MANIFEST_EXPORTS_COUNTER: CounterVec = register_counter_vec!(
        "manifest_exports_total",
        "Exports de manifeste par mode et statut",
        &["mode", "status"]
    ).unwrap();

    pub static ref MANIFEST_ROWS_COUNTER: Counter = register_counter!(
        "manifest_rows_total",
        "Lignes de livraison écrites dans les manifestes"
    ).unwrap();

    pub static ref WEEK_ORDERS_SAVED_COUNTER: Counter = register_counter!(
        "week_orders_saved_total",
        "Commandes hebdomadaires enregistrées"
    ).unwrap();
}
