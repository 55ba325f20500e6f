mod position_ledger;

pub use position_ledger::PositionLedger;
