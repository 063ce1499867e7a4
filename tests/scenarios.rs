use std::str::FromStr;

use bank_ledger::{
    account::AccountError,
    ledger::{Ledger, LedgerError},
    money::display_balance,
    transfer::{TransferCoordinator, TransferError},
};
use rust_decimal::{Decimal, prelude::Zero};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn alice_and_bob() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .create_account("Alice".to_string(), "A1".to_string(), "pw1")
        .unwrap();
    ledger
        .create_account("Bob".to_string(), "A2".to_string(), "pw2")
        .unwrap();
    ledger
}

#[test]
fn alice_pays_bob() {
    let mut ledger = alice_and_bob();
    ledger.lookup_mut("A1").unwrap().deposit(dec("100")).unwrap();
    assert_eq!(display_balance(ledger.lookup("A1").unwrap().balance()), "100.00");

    ledger.transfer("A1", "A2", dec("40")).unwrap();
    let a1 = ledger.lookup("A1").unwrap();
    let a2 = ledger.lookup("A2").unwrap();
    assert_eq!(display_balance(a1.balance()), "60.00");
    assert_eq!(display_balance(a2.balance()), "40.00");
    assert!(a1.history().iter().any(|e| e == "Transferred 40.0 to A2"));
    assert!(a2.history().iter().any(|e| e == "Received 40.0 from A1"));

    let err = ledger
        .lookup_mut("A1")
        .unwrap()
        .withdraw(dec("1000"))
        .unwrap_err();
    assert_eq!(err, AccountError::InsufficientFunds { balance: dec("60") });
    assert_eq!(display_balance(ledger.lookup("A1").unwrap().balance()), "60.00");

    let err = ledger
        .create_account("Eve".to_string(), "A1".to_string(), "x")
        .unwrap_err();
    assert_eq!(err, LedgerError::AlreadyExists("A1".to_string()));
    assert_eq!(ledger.lookup("A1").unwrap().holder_name(), "Alice");

    assert!(ledger.delete_account("A2"));
    assert!(ledger.lookup("A2").is_none());
}

#[test]
fn failed_transfer_changes_nobody() {
    let mut ledger = alice_and_bob();
    ledger.lookup_mut("A1").unwrap().deposit(dec("10")).unwrap();
    let before = (
        ledger.lookup("A1").unwrap().clone(),
        ledger.lookup("A2").unwrap().clone(),
    );

    for amount in ["10.01", "0", "-4"] {
        assert!(ledger.transfer("A1", "A2", dec(amount)).is_err());
    }
    assert_eq!(
        ledger.transfer("A2", "A1", dec("1")).unwrap_err(),
        TransferError::AccountErr(AccountError::InsufficientFunds {
            balance: Decimal::zero()
        })
    );

    assert_eq!(ledger.lookup("A1").unwrap(), &before.0);
    assert_eq!(ledger.lookup("A2").unwrap(), &before.1);
}

#[test]
fn balances_never_go_negative() {
    let mut ledger = alice_and_bob();
    let steps = [
        ("deposit", "A1", "5", true),
        ("withdraw", "A1", "7", false),
        ("transfer", "A1", "5", true),
        ("withdraw", "A2", "4.99", true),
        ("transfer", "A2", "0.02", false),
        ("withdraw", "A1", "0.01", false),
        ("deposit", "A2", "-1", false),
        ("withdraw", "A2", "0.01", true),
    ];
    for (op, number, amount, expected) in steps {
        let amount = dec(amount);
        let applied = match op {
            "deposit" => ledger.lookup_mut(number).unwrap().deposit(amount).is_ok(),
            "withdraw" => ledger.lookup_mut(number).unwrap().withdraw(amount).is_ok(),
            _ => {
                let other = if number == "A1" { "A2" } else { "A1" };
                ledger.transfer(number, other, amount).is_ok()
            }
        };
        assert_eq!(applied, expected, "{op} {number} {amount}");
        for row in ledger.list_all() {
            assert!(row.balance >= Decimal::zero(), "{row:?}");
        }
    }
    assert_eq!(ledger.lookup("A1").unwrap().balance(), Decimal::zero());
    assert_eq!(ledger.lookup("A2").unwrap().balance(), Decimal::zero());
}
