use crate::api::{NotificationReader, NotificationWriter};
use crate::domain::notification::Notification;
use crate::domain::types::NotificationId;
use crate::services::{ServiceError, ServiceResult};

/// Lists the user's notifications, unread first.
pub async fn list_notifications<R>(api: &R) -> ServiceResult<Vec<Notification>>
where
    R: NotificationReader + ?Sized,
{
    let mut notifications = api.list_notifications().await.map_err(|err| {
        log::error!("Failed to list notifications: {err}");
        err
    })?;

    // Stable sort keeps the backend order within each group.
    notifications.sort_by_key(|notification| notification.is_read);

    Ok(notifications)
}

pub async fn mark_read<R>(api: &R, notification_id: i32) -> ServiceResult<()>
where
    R: NotificationWriter + ?Sized,
{
    let notification_id =
        NotificationId::new(notification_id).map_err(|_| ServiceError::NotFound)?;

    api.mark_notification_read(notification_id)
        .await
        .map_err(|err| {
            log::error!("Failed to mark notification {notification_id} as read: {err}");
            err
        })?;

    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::api::mock::MockBackend;
    use crate::services::fixtures::stamp;

    fn notification(id: i32, is_read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id).unwrap(),
            title: format!("Notification {id}"),
            message: "Delivery approved".into(),
            kind: "info".into(),
            is_read,
            created_at: stamp(),
            link: None,
        }
    }

    #[actix_web::test]
    async fn unread_notifications_come_first() {
        let mut api = MockBackend::new();
        api.expect_list_notifications().returning(|| {
            Ok(vec![
                notification(1, true),
                notification(2, false),
                notification(3, false),
            ])
        });

        let ids: Vec<i32> = list_notifications(&api)
            .await
            .unwrap()
            .iter()
            .map(|n| n.id.get())
            .collect();

        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[actix_web::test]
    async fn marks_notification_read() {
        let mut api = MockBackend::new();
        api.expect_mark_notification_read()
            .with(eq(NotificationId::new(4).unwrap()))
            .times(1)
            .returning(|_| Ok(()));

        mark_read(&api, 4).await.unwrap();
    }
}
