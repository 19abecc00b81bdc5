use crate::backend::domain::models::Account as DomainAccount;
use shared::AccountInfo;

pub struct AccountMapper;

impl AccountMapper {
    pub fn to_dto(domain: DomainAccount) -> AccountInfo {
        AccountInfo {
            id: domain.id,
            holder_id: domain.holder_id,
            balance: domain.balance.to_units(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::Cents;

    #[test]
    fn test_balance_is_reported_in_units() {
        let dto = AccountMapper::to_dto(DomainAccount {
            id: "1_ab".to_string(),
            holder_id: "H1".to_string(),
            balance: Cents(1009),
        });
        assert_eq!(dto.balance, 10.09);
        assert_eq!(dto.holder_id, "H1");
    }
}
