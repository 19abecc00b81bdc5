//! Row shapes of the stored documents and their translation into domain models.
use crate::backend::domain::{
    errors::{LedgerError, LedgerResult},
    models::{Account, Act, Cents},
};

/// `{ id, holder_id, balance }` with balance in integer cents
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountDocument {
    pub id: String,
    pub holder_id: String,
    pub balance: i64,
}

/// `{ id, account_id, amount, date, memo }` with a signed cent amount and a YYYY-MM-DD date
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActDocument {
    pub id: String,
    pub account_id: String,
    pub amount: i64,
    pub date: String,
    pub memo: String,
}

impl From<AccountDocument> for Account {
    fn from(doc: AccountDocument) -> Self {
        Account {
            id: doc.id,
            holder_id: doc.holder_id,
            balance: Cents(doc.balance),
        }
    }
}

impl TryFrom<ActDocument> for Act {
    type Error = LedgerError;

    fn try_from(doc: ActDocument) -> LedgerResult<Self> {
        let date = doc
            .date
            .parse()
            .map_err(|e| LedgerError::Db(format!("stored act {} is corrupt: {}", doc.id, e)))?;
        Ok(Act {
            id: doc.id,
            account_id: doc.account_id,
            amount: Cents(doc.amount),
            date,
            memo: doc.memo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    fn doc(date: &str) -> ActDocument {
        ActDocument {
            id: "3_ab".to_string(),
            account_id: "1_cd".to_string(),
            amount: -250,
            date: date.to_string(),
            memo: "coffee".to_string(),
        }
    }

    #[test]
    fn test_act_document_round_trips_into_domain() {
        let act = Act::try_from(doc("2023-04-01")).unwrap();
        assert_eq!(act.amount, Cents(-250));
        assert_eq!(act.date.to_string(), "2023-04-01");
    }

    #[test]
    fn test_corrupt_date_is_a_db_error() {
        let err = Act::try_from(doc("April 1st")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Db);
    }
}
