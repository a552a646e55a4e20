use crate::api::{
    ClientListQuery, ClientReader, DeliveryListQuery, DeliveryReader, ProjectReader, ProjectWriter,
};
use crate::domain::project::{NewProject, Project};
use crate::domain::types::ProjectId;
use crate::dto::projects::{ProjectFilters, ProjectPageData, ProjectPageQuery, ProjectsPageData};
use crate::forms::projects::AddProjectForm;
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{AUTHOR_ROLES, REVIEW_ROLES};

/// Size of the client pick list on the create form.
const CLIENT_PICK_LIST_LIMIT: usize = 100;

/// Loads one page of projects matching the filters.
pub async fn load_projects_page<R>(
    api: &R,
    user: &AuthenticatedUser,
    filters: ProjectFilters,
    per_page: usize,
) -> ServiceResult<ProjectsPageData>
where
    R: ProjectReader + ClientReader + ?Sized,
{
    let page = filters.page();
    let (total, projects) = api
        .list_projects(filters.to_list_query(per_page))
        .await
        .map_err(|err| {
            log::error!("Failed to list projects: {err}");
            err
        })?;

    let can_create = user.has_role(REVIEW_ROLES);
    let clients = if can_create {
        let (_, clients) = api
            .list_clients(ClientListQuery::new().paginate(1, CLIENT_PICK_LIST_LIMIT))
            .await
            .map_err(|err| {
                log::error!("Failed to list clients: {err}");
                err
            })?;
        clients
    } else {
        Vec::new()
    };

    Ok(ProjectsPageData {
        projects: Paginated::new(projects, page, total, per_page),
        filter_query: filters.query_string(),
        filters: filters.normalized(),
        clients,
        can_create,
    })
}

/// Loads a project together with one page of its deliveries.
pub async fn load_project_page<R>(
    api: &R,
    user: &AuthenticatedUser,
    project_id: i32,
    query: ProjectPageQuery,
    per_page: usize,
) -> ServiceResult<ProjectPageData>
where
    R: ProjectReader + DeliveryReader + ?Sized,
{
    let project_id = ProjectId::new(project_id).map_err(|_| ServiceError::NotFound)?;

    let project = api
        .get_project(project_id)
        .await
        .map_err(|err| {
            log::error!("Failed to get project {project_id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    let page = query.page.unwrap_or(1).max(1);
    let (total, deliveries) = api
        .list_deliveries(
            DeliveryListQuery::new()
                .project(project_id)
                .paginate(page, per_page),
        )
        .await
        .map_err(|err| {
            log::error!("Failed to list deliveries of project {project_id}: {err}");
            err
        })?;

    Ok(ProjectPageData {
        project,
        deliveries: Paginated::new(deliveries, page, total, per_page),
        can_add_delivery: user.has_role(AUTHOR_ROLES),
    })
}

/// Validates the form and creates a project.
pub async fn create_project<R>(
    api: &R,
    user: &AuthenticatedUser,
    form: AddProjectForm,
) -> ServiceResult<Project>
where
    R: ProjectWriter + ?Sized,
{
    ensure_role(user, REVIEW_ROLES, "create projects")?;

    let new_project = NewProject::try_from(form).map_err(|err| {
        log::error!("Failed to validate project form: {err}");
        err
    })?;

    let project = api.create_project(&new_project).await.map_err(|err| {
        log::error!("Failed to create project: {err}");
        err
    })?;

    Ok(project)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::api::mock::MockBackend;
    use crate::domain::types::{DeliveryStatus, UserRole};
    use crate::services::fixtures::{client, delivery, project, user};

    #[actix_web::test]
    async fn reviewers_get_client_pick_list() {
        let mut api = MockBackend::new();
        api.expect_list_projects()
            .withf(|query| query.search.as_deref() == Some("tower"))
            .times(1)
            .returning(|_| Ok((41, vec![project(1), project(2)])));
        api.expect_list_clients()
            .times(1)
            .returning(|_| Ok((1, vec![client(1, "buyer@example.com")])));

        let filters = ProjectFilters {
            q: Some(" tower ".into()),
            page: Some(3),
            ..ProjectFilters::default()
        };
        let page = load_projects_page(&api, &user(UserRole::Quality), filters, 20)
            .await
            .unwrap();

        assert!(page.can_create);
        assert_eq!(page.clients.len(), 1);
        assert_eq!(page.projects.page, 3);
        assert_eq!(page.projects.total_pages, 3);
        assert_eq!(page.filter_query, "q=tower");
    }

    #[actix_web::test]
    async fn producers_skip_client_lookup() {
        let mut api = MockBackend::new();
        api.expect_list_projects().returning(|_| Ok((0, vec![])));
        api.expect_list_clients().times(0);

        let page = load_projects_page(
            &api,
            &user(UserRole::Producer),
            ProjectFilters::default(),
            20,
        )
        .await
        .unwrap();

        assert!(!page.can_create);
        assert!(page.projects.pages.is_empty());
    }

    #[actix_web::test]
    async fn project_page_lists_its_deliveries() {
        let mut api = MockBackend::new();
        api.expect_get_project()
            .with(eq(ProjectId::new(4).unwrap()))
            .returning(|_| Ok(Some(project(4))));
        api.expect_list_deliveries()
            .withf(|query| query.project_id == ProjectId::new(4).ok())
            .returning(|_| Ok((1, vec![delivery(7, DeliveryStatus::Draft)])));

        let page = load_project_page(
            &api,
            &user(UserRole::Producer),
            4,
            ProjectPageQuery::default(),
            20,
        )
        .await
        .unwrap();

        assert_eq!(page.project.name, "Project 4");
        assert_eq!(page.deliveries.items.len(), 1);
        assert!(page.can_add_delivery);
    }

    #[actix_web::test]
    async fn missing_project_is_not_found() {
        let mut api = MockBackend::new();
        api.expect_get_project().returning(|_| Ok(None));
        api.expect_list_deliveries().times(0);

        let result = load_project_page(
            &api,
            &user(UserRole::Admin),
            4,
            ProjectPageQuery::default(),
            20,
        )
        .await;
        assert!(matches!(result, Err(ServiceError::NotFound)));

        let result = load_project_page(
            &api,
            &user(UserRole::Admin),
            0,
            ProjectPageQuery::default(),
            20,
        )
        .await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn only_reviewers_create_projects() {
        let mut api = MockBackend::new();
        api.expect_create_project().times(0);

        let form = AddProjectForm {
            name: "Phase 2".into(),
            description: None,
            client_id: Some("1".into()),
            client_email: None,
        };
        let result = create_project(&api, &user(UserRole::Producer), form).await;

        assert!(matches!(result, Err(ServiceError::Forbidden(_))));
    }

    #[actix_web::test]
    async fn creates_project_for_new_client_email() {
        let mut api = MockBackend::new();
        api.expect_create_project()
            .withf(|new_project| {
                new_project.client_email.as_deref() == Some("new@example.com")
                    && new_project.client_id.is_none()
            })
            .times(1)
            .returning(|_| Ok(project(5)));

        let form = AddProjectForm {
            name: "Phase 2".into(),
            description: Some("Second phase".into()),
            client_id: Some(String::new()),
            client_email: Some("New@Example.com".into()),
        };
        let created = create_project(&api, &user(UserRole::Admin), form)
            .await
            .unwrap();

        assert_eq!(created.id, ProjectId::new(5).unwrap());
    }
}
