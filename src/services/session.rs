// src/services/session.rs
//
// Sessões server-side: o cookie carrega apenas um UUID opaco, o resumo do
// usuário fica aqui em memória. Destruir a sessão (logout) invalida o cookie
// de imediato, algo que um token assinado não permitiria.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::auth::SessionUser;

/// Nome do cookie de sessão (HttpOnly).
pub const SESSION_COOKIE: &str = "gestionale_session";

const SESSION_TTL_HOURS: i64 = 24;

struct SessionEntry {
    user: SessionUser,
    expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Cria uma sessão com TTL de 24h e retorna o id para o cookie.
    pub async fn insert(&self, user: SessionUser) -> Uuid {
        self.insert_with_ttl(user, Duration::hours(SESSION_TTL_HOURS))
            .await
    }

    async fn insert_with_ttl(&self, user: SessionUser, ttl: Duration) -> Uuid {
        let session_id = Uuid::new_v4();
        let entry = SessionEntry {
            user,
            expires_at: Utc::now() + ttl,
        };
        self.inner.write().await.insert(session_id, entry);
        session_id
    }

    /// Resolve a sessão sem tocar no banco. Sessões vencidas são removidas
    /// preguiçosamente aqui mesmo.
    pub async fn get(&self, session_id: Uuid) -> Option<SessionUser> {
        let mut sessions = self.inner.write().await;
        match sessions.get(&session_id) {
            Some(entry) if entry.expires_at > Utc::now() => Some(entry.user.clone()),
            Some(_) => {
                sessions.remove(&session_id);
                None
            }
            None => None,
        }
    }

    pub async fn remove(&self, session_id: Uuid) {
        self.inner.write().await.remove(&session_id);
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::Role;

    fn sample_user() -> SessionUser {
        SessionUser {
            id: Uuid::new_v4(),
            username: "mario.rossi".to_string(),
            nome: "Mario".to_string(),
            cognome: "Rossi".to_string(),
            role: Role::Admin,
            tenant_id: Some(Uuid::new_v4()),
            tenant_name: Some("Agenzia Demo".to_string()),
        }
    }

    #[tokio::test]
    async fn insert_and_get_round_trip() {
        let store = SessionStore::new();
        let user = sample_user();
        let session_id = store.insert(user.clone()).await;

        let resolved = store.get(session_id).await.expect("sessão ativa");
        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.username, user.username);
    }

    #[tokio::test]
    async fn expired_session_is_gone() {
        let store = SessionStore::new();
        let session_id = store
            .insert_with_ttl(sample_user(), Duration::seconds(-1))
            .await;

        assert!(store.get(session_id).await.is_none());
        // E a entrada vencida foi purgada
        assert!(store.inner.read().await.is_empty());
    }

    #[tokio::test]
    async fn remove_destroys_the_session() {
        let store = SessionStore::new();
        let session_id = store.insert(sample_user()).await;

        store.remove(session_id).await;
        assert!(store.get(session_id).await.is_none());
    }

    #[tokio::test]
    async fn unknown_id_resolves_to_none() {
        let store = SessionStore::new();
        assert!(store.get(Uuid::new_v4()).await.is_none());
    }
}
