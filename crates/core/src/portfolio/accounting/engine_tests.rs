#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::errors::{Error, ValidationError};
    use crate::portfolio::accounting::{compute_operation, Operation, OperationKind};
    use crate::portfolio::positions::Position;

    fn position(ticker: &str, quantity: Decimal, total_cost: Decimal, realized: Decimal) -> Position {
        Position::new(ticker, quantity, total_cost, realized)
    }

    #[test]
    fn test_first_buy_sets_average_to_unit_price() {
        let result = compute_operation(&Operation::buy("PETR4", dec!(10), dec!(10)), None, None).unwrap();

        assert_eq!(result.kind, OperationKind::Buy);
        assert_eq!(result.final_quantity, dec!(10));
        assert_eq!(result.total_invested, dec!(100.00));
        assert_eq!(result.average_cost, dec!(10));
        assert_eq!(result.operation_total, dec!(100.00));
        assert_eq!(result.realized_profit_loss, Decimal::ZERO);
        assert_eq!(result.operation_profit_loss, Decimal::ZERO);
    }

    #[test]
    fn test_buy_buy_sell_sequence() {
        let first = compute_operation(&Operation::buy("PETR4", dec!(10), dec!(10)), None, None).unwrap();
        let after_first = first.to_position();

        let second = compute_operation(
            &Operation::buy("PETR4", dec!(10), dec!(20)),
            Some(&after_first),
            Some(&after_first),
        )
        .unwrap();
        assert_eq!(second.final_quantity, dec!(20));
        assert_eq!(second.total_invested, dec!(300.00));
        assert_eq!(second.average_cost, dec!(15));
        let after_second = second.to_position();

        let sell = compute_operation(
            &Operation::sell("PETR4", dec!(5), dec!(18)),
            Some(&after_second),
            Some(&after_second),
        )
        .unwrap();
        assert_eq!(sell.average_cost, dec!(15));
        assert_eq!(sell.operation_profit_loss, dec!(15.00));
        assert_eq!(sell.final_quantity, dec!(15));
        assert_eq!(sell.total_invested, dec!(225.00));
        assert_eq!(sell.realized_profit_loss, dec!(15.00));
        assert_eq!(sell.operation_total, dec!(90.00));
        assert!(!sell.is_closing());
    }

    #[test]
    fn test_sell_uses_pre_sell_average() {
        // 3 units at 100 total: average 33.33333333
        let current = position("VALE3", dec!(3), dec!(100), dec!(0));
        let result = compute_operation(
            &Operation::sell("VALE3", dec!(1), dec!(40)),
            Some(&current),
            Some(&current),
        )
        .unwrap();

        assert_eq!(result.average_cost, dec!(33.33333333));
        // (40 - 33.33333333) * 1 = 6.66666667 -> 6.67
        assert_eq!(result.operation_profit_loss, dec!(6.67));
        assert_eq!(result.total_cost, dec!(66.66666666));
        assert_eq!(result.total_invested, dec!(66.67));
    }

    #[test]
    fn test_sell_at_loss_is_negative() {
        let current = position("MGLU3", dec!(100), dec!(1000), dec!(5));
        let result = compute_operation(
            &Operation::sell("MGLU3", dec!(40), dec!(8)),
            Some(&current),
            Some(&current),
        )
        .unwrap();
        assert_eq!(result.operation_profit_loss, dec!(-80.00));
        assert_eq!(result.realized_profit_loss, dec!(-75.00));
    }

    #[test]
    fn test_full_sell_zeroes_total_cost() {
        let current = position("VALE3", dec!(3), dec!(100), dec!(0));
        let result = compute_operation(
            &Operation::sell("VALE3", dec!(3), dec!(35)),
            Some(&current),
            Some(&current),
        )
        .unwrap();

        assert!(result.is_closing());
        assert_eq!(result.final_quantity, Decimal::ZERO);
        assert_eq!(result.total_cost, Decimal::ZERO);
        assert_eq!(result.total_invested, Decimal::ZERO);
        assert_eq!(result.operation_profit_loss, dec!(5.00));
        assert_eq!(result.to_position().realized_profit_loss, dec!(5.00));
    }

    #[test]
    fn test_rebuy_after_close_keeps_realized_profit_loss() {
        let closed = position("ITSA4", dec!(0), dec!(0), dec!(42.10));
        let result = compute_operation(
            &Operation::buy("ITSA4", dec!(10), dec!(9.5)),
            None,
            Some(&closed),
        )
        .unwrap();

        assert_eq!(result.final_quantity, dec!(10));
        assert_eq!(result.total_invested, dec!(95.00));
        assert_eq!(result.average_cost, dec!(9.5));
        assert_eq!(result.realized_profit_loss, dec!(42.10));
    }

    #[test]
    fn test_buy_on_open_position_prefers_history_realized() {
        let current = position("BBAS3", dec!(10), dec!(250), dec!(0));
        let history = position("BBAS3", dec!(10), dec!(250), dec!(12.34));
        let result = compute_operation(
            &Operation::buy("BBAS3", dec!(10), dec!(30)),
            Some(&current),
            Some(&history),
        )
        .unwrap();
        assert_eq!(result.realized_profit_loss, dec!(12.34));
        assert_eq!(result.average_cost, dec!(27.5));
    }

    #[test]
    fn test_oversell_is_rejected() {
        let current = position("PETR4", dec!(5), dec!(50), dec!(0));
        let err = compute_operation(
            &Operation::sell("PETR4", dec!(6), dec!(10)),
            Some(&current),
            Some(&current),
        )
        .unwrap_err();

        match err {
            Error::InsufficientPosition {
                ticker,
                requested,
                held,
            } => {
                assert_eq!(ticker, "PETR4");
                assert_eq!(requested, dec!(6));
                assert_eq!(held, dec!(5));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sell_without_position_is_rejected() {
        let closed = position("PETR4", dec!(0), dec!(0), dec!(10));
        let err = compute_operation(
            &Operation::sell("PETR4", dec!(1), dec!(10)),
            None,
            Some(&closed),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InsufficientPosition { held, .. } if held.is_zero()));
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            Operation::buy("  ", dec!(1), dec!(1)),
            Operation::buy("PETR4", dec!(0), dec!(1)),
            Operation::buy("PETR4", dec!(-1), dec!(1)),
            Operation::sell("PETR4", dec!(1), dec!(0)),
        ];
        for operation in cases {
            let err = compute_operation(&operation, None, None).unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{operation:?} -> {err}");
        }
    }

    #[test]
    fn test_mismatched_position_ticker_is_rejected() {
        let other = position("VALE3", dec!(1), dec!(10), dec!(0));
        let err = compute_operation(
            &Operation::buy("PETR4", dec!(1), dec!(10)),
            Some(&other),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::InvalidInput(_))));
    }

    #[test]
    fn test_fractional_prices_stay_exact() {
        let first = compute_operation(&Operation::buy("BOVA11", dec!(3), dec!(0.1)), None, None).unwrap();
        let second = compute_operation(
            &Operation::buy("BOVA11", dec!(7), dec!(0.2)),
            Some(&first.to_position()),
            None,
        )
        .unwrap();
        assert_eq!(second.total_cost, dec!(1.7));
        assert_eq!(second.average_cost, dec!(0.17));
    }
}
