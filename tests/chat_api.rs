mod common;

use std::time::Duration;

use axum::http::StatusCode;
use futures::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use travel::{create_routes, domain::chat::entity::ChatMessage};

use common::{app_state, post_json, router, spawn, test_config};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn next_text(socket: &mut Socket) -> String {
	loop {
		let frame = tokio::time::timeout(Duration::from_secs(5), socket.next())
			.await
			.expect("no frame within 5s")
			.expect("socket closed")
			.unwrap();
		if let Message::Text(text) = frame {
			return text;
		}
	}
}

#[tokio::test]
async fn test_send_then_fetch_in_order() {
	let router = router();
	for text in ["hola", "que tal", "vamos a la playa"] {
		let (status, sent) = post_json(
			&router,
			"/api/chat/send",
			json!({"location": "Valencia", "user_id": "u-1", "user_name": "Lu", "message": text}),
		)
		.await;
		assert_eq!(status, StatusCode::CREATED);
		assert_eq!(sent["message"]["message"], text);
		tokio::time::sleep(std::time::Duration::from_millis(2)).await;
	}
	post_json(
		&router,
		"/api/chat/send",
		json!({"location": "Madrid", "user_id": "u-2", "user_name": "Jo", "message": "other room"}),
	)
	.await;

	let (status, fetched) = post_json(&router, "/api/chat/fetch", json!({"location": "valencia"})).await;
	assert_eq!(status, StatusCode::OK);
	let texts: Vec<&str> = fetched["messages"].as_array().unwrap().iter().map(|m| m["message"].as_str().unwrap()).collect();
	assert_eq!(texts, vec!["hola", "que tal", "vamos a la playa"]);

	let (_, latest) = post_json(&router, "/api/chat/fetch", json!({"location": "Valencia", "limit": 1})).await;
	assert_eq!(latest["messages"].as_array().unwrap().len(), 1);
	assert_eq!(latest["messages"][0]["message"], "vamos a la playa");
}

#[tokio::test]
async fn test_fetch_since_only_returns_newer() {
	let router = router();
	let (_, first) = post_json(
		&router,
		"/api/chat/send",
		json!({"location": "Tbilisi", "user_id": "u", "user_name": "U", "message": "old"}),
	)
	.await;
	tokio::time::sleep(std::time::Duration::from_millis(5)).await;
	post_json(
		&router,
		"/api/chat/send",
		json!({"location": "Tbilisi", "user_id": "u", "user_name": "U", "message": "new"}),
	)
	.await;

	let since = first["message"]["create_dt"].clone();
	let (status, fetched) = post_json(&router, "/api/chat/fetch", json!({"location": "Tbilisi", "since": since})).await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(fetched["messages"].as_array().unwrap().len(), 1);
	assert_eq!(fetched["messages"][0]["message"], "new");
}

#[tokio::test]
async fn test_sent_message_reaches_live_room() {
	'_given: {
		let state = app_state(&test_config(None, None));
		let router = create_routes(state.clone());
		let mut room = state.rooms.subscribe("Accra").await;

		'_when: {
			let (status, _) = post_json(
				&router,
				"/api/chat/send",
				json!({"location": "accra", "user_id": "u", "user_name": "Kofi", "message": "akwaaba"}),
			)
			.await;
			assert_eq!(status, StatusCode::CREATED);

			'_then: {
				let pushed: ChatMessage = serde_json::from_str(&room.recv().await.unwrap()).unwrap();
				assert_eq!(pushed.message, "akwaaba");
				assert_eq!(pushed.user_name, "Kofi");
			}
		}
	}
}

#[tokio::test]
async fn test_send_validation() {
	let router = router();
	let (status, body) = post_json(
		&router,
		"/api/chat/send",
		json!({"location": "Accra", "user_id": "u", "user_name": "Kofi", "message": "x".repeat(2001)}),
	)
	.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["error"], "message must be at most 2000 characters");

	let (status, _) = post_json(&router, "/api/chat/fetch", json!({"location": ""})).await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_websocket_session() {
	'_given: {
		let state = app_state(&test_config(None, None));
		let router = create_routes(state.clone());
		let base_url = spawn(router.clone()).await;
		let (mut socket, _) = connect_async(format!("{}/api/chat/ws?location=Hoi%20An", base_url.replacen("http", "ws", 1)))
			.await
			.unwrap();

		'_when: {
			socket.send(Message::Text("not json".into())).await.unwrap();
			let malformed: Value = serde_json::from_str(&next_text(&mut socket).await).unwrap();

			socket
				.send(Message::Text(json!({"user_id": "u-9", "user_name": "Mai", "message": "  "}).to_string()))
				.await
				.unwrap();
			let invalid: Value = serde_json::from_str(&next_text(&mut socket).await).unwrap();

			socket.send(Message::Binary(vec![1, 2, 3])).await.unwrap();
			let binary: Value = serde_json::from_str(&next_text(&mut socket).await).unwrap();

			socket
				.send(Message::Text(json!({"user_id": "u-9", "user_name": "Mai", "message": "pho at 7?"}).to_string()))
				.await
				.unwrap();
			let echoed: ChatMessage = serde_json::from_str(&next_text(&mut socket).await).unwrap();

			'_then: {
				assert!(malformed["error"].is_string());
				assert_eq!(invalid["error"], "message is required");
				assert_eq!(binary["error"], "binary frames are not supported");

				assert_eq!(echoed.message, "pho at 7?");
				assert_eq!(echoed.location, "Hoi An");
				assert_eq!(echoed.user_name, "Mai");

				let (status, fetched) = post_json(&router, "/api/chat/fetch", json!({"location": "hoi an"})).await;
				assert_eq!(status, StatusCode::OK);
				assert_eq!(fetched["messages"].as_array().unwrap().len(), 1);
				assert_eq!(fetched["messages"][0]["id"], json!(echoed.id));

				post_json(
					&router,
					"/api/chat/send",
					json!({"location": "HOI AN", "user_id": "u-1", "user_name": "Lan", "message": "yes"}),
				)
				.await;
				let pushed: ChatMessage = serde_json::from_str(&next_text(&mut socket).await).unwrap();
				assert_eq!(pushed.user_name, "Lan");

				socket.close(None).await.unwrap();
				let ended = tokio::time::timeout(Duration::from_secs(5), async {
					while let Some(Ok(frame)) = socket.next().await {
						if frame.is_close() {
							break;
						}
					}
				})
				.await;
				assert!(ended.is_ok());
			}
		}
	}
}
