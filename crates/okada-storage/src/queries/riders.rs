// SPDX-FileCopyrightText: 2026 Okada Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rider record operations.

use std::str::FromStr;

use rusqlite::params;

use okada_core::types::{Rider, RiderStatus};
use okada_core::OkadaError;

use crate::database::Database;

fn row_to_rider(row: &rusqlite::Row<'_>) -> Result<Rider, rusqlite::Error> {
    let status: String = row.get(2)?;
    let status = RiderStatus::from_str(&status).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Rider {
        phone: row.get(0)?,
        name: row.get(1)?,
        status,
        registered_at: row.get(3)?,
    })
}

/// Insert or overwrite a rider record. Re-registration with the correct
/// code simply resets the record.
pub async fn put_rider(db: &Database, rider: &Rider) -> Result<(), OkadaError> {
    let rider = rider.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO riders (phone, name, status, registered_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (phone) DO UPDATE SET
                     name = excluded.name,
                     status = excluded.status,
                     registered_at = excluded.registered_at",
                params![
                    rider.phone,
                    rider.name,
                    rider.status.to_string(),
                    rider.registered_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a rider by phone identity.
pub async fn get_rider(db: &Database, phone: &str) -> Result<Option<Rider>, OkadaError> {
    let phone = phone.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT phone, name, status, registered_at FROM riders WHERE phone = ?1",
                params![phone],
                row_to_rider,
            );
            match result {
                Ok(rider) => Ok(Some(rider)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Set a rider's duty status.
pub async fn set_rider_status(
    db: &Database,
    phone: &str,
    status: RiderStatus,
) -> Result<(), OkadaError> {
    let phone = phone.to_string();
    let status = status.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE riders SET status = ?1 WHERE phone = ?2",
                params![status, phone],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All riders currently on duty, in registration order.
pub async fn riders_on_duty(db: &Database) -> Result<Vec<Rider>, OkadaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT phone, name, status, registered_at FROM riders
                 WHERE status = 'on_duty' ORDER BY registered_at ASC",
            )?;
            let rows = stmt.query_map([], row_to_rider)?;
            let mut riders = Vec::new();
            for row in rows {
                riders.push(row?);
            }
            Ok(riders)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn make_rider(phone: &str, name: &str) -> Rider {
        Rider {
            phone: phone.to_string(),
            name: name.to_string(),
            status: RiderStatus::Inactive,
            registered_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn put_and_get_rider() {
        let (db, _dir) = setup_db().await;
        let rider = make_rider("whatsapp:+2348100000001", "Tunde");
        put_rider(&db, &rider).await.unwrap();

        let back = get_rider(&db, "whatsapp:+2348100000001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(back, rider);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_rider_is_none() {
        let (db, _dir) = setup_db().await;
        assert!(get_rider(&db, "whatsapp:+234999")
            .await
            .unwrap()
            .is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn duty_toggle_and_listing() {
        let (db, _dir) = setup_db().await;
        let a = make_rider("whatsapp:+2348100000001", "Tunde");
        let b = make_rider("whatsapp:+2348100000002", "Chika");
        put_rider(&db, &a).await.unwrap();
        put_rider(&db, &b).await.unwrap();

        assert!(riders_on_duty(&db).await.unwrap().is_empty());

        set_rider_status(&db, &a.phone, RiderStatus::OnDuty)
            .await
            .unwrap();
        let on_duty = riders_on_duty(&db).await.unwrap();
        assert_eq!(on_duty.len(), 1);
        assert_eq!(on_duty[0].phone, a.phone);
        assert_eq!(on_duty[0].status, RiderStatus::OnDuty);

        set_rider_status(&db, &a.phone, RiderStatus::Inactive)
            .await
            .unwrap();
        assert!(riders_on_duty(&db).await.unwrap().is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reregistration_overwrites() {
        let (db, _dir) = setup_db().await;
        let mut rider = make_rider("whatsapp:+2348100000003", "Old Name");
        put_rider(&db, &rider).await.unwrap();

        rider.name = "New Name".to_string();
        put_rider(&db, &rider).await.unwrap();

        let back = get_rider(&db, &rider.phone).await.unwrap().unwrap();
        assert_eq!(back.name, "New Name");
        db.close().await.unwrap();
    }
}
