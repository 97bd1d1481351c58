use serde::Serialize;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}

// Response de lecturas servidas por el cache: expone de dónde salió el dato
#[derive(Debug, Serialize)]
pub struct CachedResponse<T> {
    pub success: bool,
    pub from_cache: bool,
    pub is_refreshing: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> CachedResponse<T> {
    pub fn from_snapshot(snapshot: crate::cache::CacheSnapshot<T>) -> Self {
        let message = snapshot.error.as_ref().map(|e| e.to_string());
        Self {
            success: snapshot.data.is_some(),
            from_cache: snapshot.from_cache,
            is_refreshing: snapshot.is_refreshing,
            data: snapshot.data,
            message,
        }
    }
}
