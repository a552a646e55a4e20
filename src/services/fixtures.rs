//! Builders shared by the service tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::client::Client;
use crate::domain::delivery::Delivery;
use crate::domain::file::FileItem;
use crate::domain::nce::Nce;
use crate::domain::project::Project;
use crate::domain::survey::Survey;
use crate::domain::types::{
    ClientId, DeliveryId, DeliveryStatus, FileId, NceId, NceSeverity, NceStatus, ProjectId,
    SurveyId, SurveyScore, SurveyType, UserId, UserRole,
};
use crate::models::auth::AuthenticatedUser;

pub fn stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 4, 2)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

pub fn user(role: UserRole) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(1).unwrap(),
        email: format!("{}@example.com", role.as_str()),
        full_name: "Test User".to_string(),
        role,
        token: "token".to_string(),
    }
}

pub fn client(id: i32, email: &str) -> Client {
    Client {
        id: ClientId::new(id).unwrap(),
        full_name: None,
        email: email.to_string(),
    }
}

pub fn project(id: i32) -> Project {
    Project {
        id: ProjectId::new(id).unwrap(),
        name: format!("Project {id}"),
        description: None,
        client: None,
        client_name: None,
        created_at: stamp(),
    }
}

pub fn delivery(id: i32, status: DeliveryStatus) -> Delivery {
    Delivery {
        id: DeliveryId::new(id).unwrap(),
        project: None,
        project_ref: ProjectId::new(1).ok(),
        title: format!("Delivery {id}"),
        description: None,
        status,
        version: 1,
        created_at: stamp(),
        delivered_at: None,
    }
}

pub fn nce(id: i32, severity: NceSeverity, status: NceStatus) -> Nce {
    Nce {
        id: NceId::new(id).unwrap(),
        delivery: None,
        delivery_ref: DeliveryId::new(1).ok(),
        title: format!("NCE {id}"),
        description: "Found during inspection".to_string(),
        severity,
        status,
        category: None,
        created_at: stamp(),
        resolved_at: None,
        files: Vec::new(),
    }
}

pub fn survey(id: i32, survey_type: SurveyType, score: u8) -> Survey {
    Survey {
        id: SurveyId::new(id).unwrap(),
        delivery: None,
        delivery_ref: DeliveryId::new(1).ok(),
        survey_type,
        score: SurveyScore::new(score).ok(),
        comment: None,
        sent_at: stamp(),
        completed_at: Some(stamp()),
    }
}

pub fn file_item(id: i32, filename: &str) -> FileItem {
    FileItem {
        id: FileId::new(id).unwrap(),
        filename: filename.to_string(),
        storage_key: format!("deliveries/{id}/{filename}"),
        uploaded_at: stamp(),
        is_receipt: false,
    }
}
