use crate::client::ApiClient;

pub struct AppState {
    pub client: ApiClient,
    pub template_path: String,
}
