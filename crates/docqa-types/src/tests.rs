#[cfg(test)]
mod tests {
    use crate::ClientError;
    use crate::admin::*;
    use crate::chat::*;
    use crate::config::*;
    use crate::http::*;
    use crate::session::*;

    // ─── Error Tests ─────────────────────────────────────────

    #[test]
    fn test_api_error_displays_backend_message() {
        let err = ClientError::Api { status: 400, message: "X".to_string() };
        assert_eq!(err.to_string(), "X");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_network_error_display() {
        let err = ClientError::Network("offline".to_string());
        assert_eq!(err.to_string(), "Network error: offline");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_unauthorized_detection() {
        let by_status = ClientError::Api { status: 401, message: "nope".to_string() };
        let by_detail = ClientError::Api {
            status: 403,
            message: "Could not validate credentials".to_string(),
        };
        let other = ClientError::Api { status: 500, message: "boom".to_string() };
        assert!(by_status.is_unauthorized());
        assert!(by_detail.is_unauthorized());
        assert!(!other.is_unauthorized());
        assert!(!ClientError::Network("x".to_string()).is_unauthorized());
    }

    #[test]
    fn test_serde_error_conversion() {
        let err: ClientError = serde_json::from_str::<Thread>("{").unwrap_err().into();
        assert!(matches!(err, ClientError::Serialization(_)));
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.token_key, "userToken");
        assert!(!config.api_url.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_override() {
        let config = ClientConfig::from_json(r#"{"api_url": "https://qa.example.org"}"#).unwrap();
        assert_eq!(config.api_url, "https://qa.example.org");
        assert_eq!(config.token_key, DEFAULT_TOKEN_KEY);
    }

    #[test]
    fn test_config_rejects_blank_url() {
        let result = ClientConfig::from_json(r#"{"api_url": "  "}"#);
        assert!(matches!(result, Err(ClientError::Config(_))));
    }

    // ─── Session Types ───────────────────────────────────────

    #[test]
    fn test_role_from_claim() {
        assert_eq!(Role::from_claim(Some("admin")), Role::Admin);
        assert_eq!(Role::from_claim(Some("user")), Role::User);
        assert_eq!(Role::from_claim(Some("Admin")), Role::User);
        assert_eq!(Role::from_claim(None), Role::User);
    }

    #[test]
    fn test_login_response_parse() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"access_token": "abc", "token_type": "bearer"}"#).unwrap();
        assert_eq!(resp.access_token, "abc");
        assert_eq!(resp.token_type.as_deref(), Some("bearer"));
    }

    // ─── Chat Types ──────────────────────────────────────────

    #[test]
    fn test_thread_started_with_short_message() {
        let thread = Thread::started_with("t1", "Hello");
        assert_eq!(thread.thread_id, "t1");
        assert_eq!(thread.name, "Hello");
        assert!(!thread.updated_at.is_empty());
    }

    #[test]
    fn test_thread_started_with_long_message_is_truncated() {
        let text = "a".repeat(100);
        let thread = Thread::started_with("t1", &text);
        assert_eq!(thread.name, format!("{}...", "a".repeat(40)));
    }

    #[test]
    fn test_thread_new_ids_are_unique() {
        assert_ne!(Thread::new_id(), Thread::new_id());
    }

    #[test]
    fn test_thread_updated_label() {
        let thread = Thread {
            thread_id: "t".to_string(),
            name: "n".to_string(),
            updated_at: "2025-03-01T08:30:00.123456".to_string(),
        };
        assert_eq!(thread.updated_label(), "2025-03-01 08:30");

        let odd = Thread { updated_at: "yesterday".to_string(), ..thread };
        assert_eq!(odd.updated_label(), "yesterday");
    }

    #[test]
    fn test_history_entry_mapping() {
        let history: ThreadHistory = serde_json::from_str(
            r#"{"messages": [
                {"type": "human", "content": "hi"},
                {"type": "ai", "content": "hello", "sources": [{"name": "doc.pdf", "url": "http://x"}], "response_time": 1.5}
            ]}"#,
        )
        .unwrap();
        let messages: Vec<ChatMessage> = history.messages.into_iter().map(Into::into).collect();
        assert_eq!(messages[0].sender, Sender::User);
        assert!(messages[0].sources.is_empty());
        assert_eq!(messages[1].sender, Sender::Ai);
        assert_eq!(messages[1].sources[0].name, "doc.pdf");
        assert_eq!(messages[1].response_time, Some(1.5));
    }

    #[test]
    fn test_chat_reply_null_sources() {
        let reply: ChatReply =
            serde_json::from_str(r#"{"answer": "42", "sources": null}"#).unwrap();
        let msg: ChatMessage = reply.into();
        assert_eq!(msg.sender, Sender::Ai);
        assert_eq!(msg.text, "42");
        assert!(msg.sources.is_empty());
        assert!(msg.response_time.is_none());
    }

    #[test]
    fn test_response_time_label_only_for_ai() {
        let mut ai = ChatMessage::ai("x");
        ai.response_time = Some(2.345);
        assert_eq!(ai.response_time_label().as_deref(), Some("Answered in 2.35 s"));

        let mut user = ChatMessage::user("x");
        user.response_time = Some(1.0);
        assert!(user.response_time_label().is_none());
    }

    #[test]
    fn test_request_bodies_serialize() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let json = serde_json::to_value(BatchDeleteBody { thread_ids: &ids }).unwrap();
        assert_eq!(json, serde_json::json!({"thread_ids": ["a", "b"]}));

        let json = serde_json::to_value(ChatRequestBody { thread_id: "t", message: "m" }).unwrap();
        assert_eq!(json, serde_json::json!({"thread_id": "t", "message": "m"}));
    }

    // ─── Admin Types ─────────────────────────────────────────

    fn sample_dashboard() -> Dashboard {
        Dashboard {
            db_stats: DbStats {
                total_collections: 2,
                total_documents: 7,
                details: vec![CollectionDetail { name: "rules".to_string(), document_count: 7 }],
            },
            collections: vec![
                Collection { id: "1".to_string(), name: "rules".to_string() },
                Collection { id: "2".to_string(), name: "fresh".to_string() },
            ],
            response_stats: ResponseStats::default(),
            token_stats: TokenUsageStats::default(),
        }
    }

    #[test]
    fn test_dashboard_rows_join_counts_by_name() {
        let rows = sample_dashboard().rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].document_count, Some(7));
        assert_eq!(rows[0].count_label(), "7");
        assert_eq!(rows[1].document_count, None);
        assert_eq!(rows[1].count_label(), "N/A");
    }

    #[test]
    fn test_collection_numeric_id() {
        let c: Collection = serde_json::from_str(r#"{"id": 12, "name": "x"}"#).unwrap();
        assert_eq!(c.id, "12");
        let c: Collection = serde_json::from_str(r#"{"id": "uuid-1", "name": "x"}"#).unwrap();
        assert_eq!(c.id, "uuid-1");
        assert!(serde_json::from_str::<Collection>(r#"{"id": null, "name": "x"}"#).is_err());
    }

    #[test]
    fn test_pagination_labels() {
        let p = Pagination { offset: 20, limit: 10, total: 25, has_next: false };
        assert_eq!(p.page(), 3);
        assert_eq!(p.range_label(), "21 - 25");

        let empty = Pagination { offset: 0, limit: 10, total: 0, has_next: false };
        assert_eq!(empty.page(), 1);
        assert_eq!(empty.range_label(), "0 - 0");
    }

    #[test]
    fn test_document_page_parse() {
        let page: DocumentPage = serde_json::from_str(
            r#"{"documents": [{"id": "d1", "content": "text", "metadata": {"source": "a.pdf", "page": 3}}],
                "pagination": {"offset": 0, "limit": 10, "total": 1, "has_next": false}}"#,
        )
        .unwrap();
        assert_eq!(page.documents.len(), 1);
        let mut pairs = page.documents[0].metadata_pairs();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "3".to_string()),
                ("source".to_string(), "a.pdf".to_string()),
            ]
        );
    }

    #[test]
    fn test_document_preview() {
        let doc = Document { id: "d".to_string(), content: "abcdef".to_string(), metadata: None };
        assert_eq!(doc.preview(10), "abcdef");
        assert_eq!(doc.preview(3), "abc...");
        assert!(doc.metadata_pairs().is_empty());
    }

    // ─── HTTP Types ──────────────────────────────────────────

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "http://x/".to_string(),
            headers: vec![("Authorization".to_string(), "Bearer t".to_string())],
            body: RequestBody::Empty,
        };
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert!(req.header("content-type").is_none());
    }

    #[test]
    fn test_response_ok_range() {
        let mut resp = HttpResponse { status: 204, status_text: String::new(), body: String::new() };
        assert!(resp.ok());
        resp.status = 302;
        assert!(!resp.ok());
    }

    #[test]
    fn test_upload_size_label() {
        let file = UploadFile { name: "a".to_string(), mime_type: String::new(), bytes: vec![0; 2048] };
        assert_eq!(file.size_label(), "2.0 KB");
    }
}
