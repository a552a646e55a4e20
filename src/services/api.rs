use crate::api::{ClientListQuery, ClientReader, ProjectListQuery, ProjectReader};
use crate::dto::api::{ClientsResponse, LookupQuery, ProjectsResponse};
use crate::services::ServiceResult;

/// Returns the clients whose email contains the search fragment.
///
/// The backend search also matches names, so results are narrowed down to
/// email matches here.
pub async fn list_clients<R>(
    api: &R,
    params: LookupQuery,
    per_page: usize,
) -> ServiceResult<ClientsResponse>
where
    R: ClientReader + ?Sized,
{
    let mut query = ClientListQuery::new();

    if let Some(page) = params.page {
        query = query.paginate(page, per_page);
    }

    let search = params.term();

    if let Some(term) = &search {
        query = query.search(term.clone());
    }

    let (total, clients) = api.list_clients(query).await.map_err(|err| {
        log::error!("Failed to list clients: {err}");
        err
    })?;

    let Some(term) = search else {
        return Ok(ClientsResponse { total, clients });
    };

    let fetched = clients.len();
    let clients = clients
        .into_iter()
        .filter(|client| client.email_matches(&term))
        .collect::<Vec<_>>();

    Ok(ClientsResponse {
        total: total.saturating_sub(fetched - clients.len()),
        clients,
    })
}

/// Returns project names matching the search fragment for the project filter.
pub async fn list_project_names<R>(
    api: &R,
    params: LookupQuery,
    per_page: usize,
) -> ServiceResult<ProjectsResponse>
where
    R: ProjectReader + ?Sized,
{
    let page = params.page.unwrap_or(1);
    let mut query = ProjectListQuery::new().paginate(page, per_page);

    if let Some(term) = params.term() {
        query = query.search(term);
    }

    let (total, projects) = api.list_projects(query).await.map_err(|err| {
        log::error!("Failed to list projects: {err}");
        err
    })?;

    Ok(ProjectsResponse {
        total,
        projects: projects.into_iter().map(Into::into).collect(),
    })
}
