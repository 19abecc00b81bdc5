use crate::backend::domain::models::{Act as DomainAct, StatementEntry};
use shared::{Act as SharedAct, StatementLine};

pub struct ActMapper;

impl ActMapper {
    pub fn to_dto(domain: DomainAct) -> SharedAct {
        SharedAct {
            id: domain.id,
            amount: domain.amount.to_units(),
            date: domain.date.to_string(),
            memo: domain.memo,
        }
    }

    pub fn to_statement_line(entry: StatementEntry) -> StatementLine {
        let StatementEntry { act, balance } = entry;
        StatementLine {
            id: act.id,
            amount: act.amount.to_units(),
            date: act.date.to_string(),
            memo: act.memo,
            balance: balance.to_units(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::Cents;

    fn act() -> DomainAct {
        DomainAct {
            id: "2_cd".to_string(),
            account_id: "1_ab".to_string(),
            amount: Cents(-2000),
            date: "2023-01-01".parse().unwrap(),
            memo: "rent".to_string(),
        }
    }

    #[test]
    fn test_act_drops_account_id() {
        let dto = ActMapper::to_dto(act());
        assert_eq!(dto.id, "2_cd");
        assert_eq!(dto.amount, -20.0);
        assert_eq!(dto.date, "2023-01-01");
    }

    #[test]
    fn test_statement_line_carries_balance() {
        let line = ActMapper::to_statement_line(StatementEntry {
            act: act(),
            balance: Cents(6000),
        });
        assert_eq!(line.memo, "rent");
        assert_eq!(line.balance, 60.0);
    }
}
