// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session persistence: one JSON document per phone identity.

use rusqlite::params;

use okada_core::types::Session;
use okada_core::OkadaError;

use crate::database::Database;

/// Insert or fully overwrite the session for a phone identity.
pub async fn put_session(db: &Database, session: &Session) -> Result<(), OkadaError> {
    let phone = session.phone.clone();
    let step = session.step.to_string();
    let data = serde_json::to_string(session).map_err(OkadaError::storage)?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sessions (phone, step, data)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (phone) DO UPDATE SET
                     step = excluded.step,
                     data = excluded.data,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
                params![phone, step, data],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get the session for a phone identity, if one exists.
pub async fn get_session(db: &Database, phone: &str) -> Result<Option<Session>, OkadaError> {
    let phone = phone.to_string();
    let data: Option<String> = db
        .connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT data FROM sessions WHERE phone = ?1",
                params![phone],
                |row| row.get(0),
            );
            match result {
                Ok(data) => Ok(Some(data)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match data {
        Some(json) => {
            let session = serde_json::from_str(&json).map_err(OkadaError::storage)?;
            Ok(Some(session))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use okada_core::types::{CartLine, ConversationState, LineKind, OrderType, Size};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn put_and_get_session_round_trips() {
        let (db, _dir) = setup_db().await;
        let mut session = Session::new("whatsapp:+2348011111111");
        session.step = ConversationState::ProteinLoop;
        session.order_type = Some(OrderType::Food);
        session.cart.push(CartLine {
            name: "Eba".into(),
            unit_price: 2500,
            quantity: 1,
            size: Size::Regular,
            kind: LineKind::Main,
        });

        put_session(&db, &session).await.unwrap();
        let back = get_session(&db, "whatsapp:+2348011111111")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(back, session);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_session_returns_none() {
        let (db, _dir) = setup_db().await;
        let result = get_session(&db, "whatsapp:+2340000000000").await.unwrap();
        assert!(result.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn put_overwrites_existing_session() {
        let (db, _dir) = setup_db().await;
        let mut session = Session::new("whatsapp:+2348022222222");
        put_session(&db, &session).await.unwrap();

        session.step = ConversationState::AwaitingPayment;
        session.final_total = 6500;
        put_session(&db, &session).await.unwrap();

        let back = get_session(&db, "whatsapp:+2348022222222")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(back.step, ConversationState::AwaitingPayment);
        assert_eq!(back.final_total, 6500);
        db.close().await.unwrap();
    }
}
