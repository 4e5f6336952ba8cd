use crate::{
    game::{GameOverReason, SelectionOutcome},
    models::TeamId,
    session::{GameRegistry, SessionError, SessionPlayer},
    websocket::messages::{ClientMessage, ServerMessage},
    AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Game a connection has joined, and under which name
#[derive(Debug, Clone)]
pub struct Membership {
    pub game_id: String,
    pub username: String,
}

/// Per-socket state
#[derive(Debug)]
pub struct Connection {
    pub id: Uuid,
    pub tx: mpsc::Sender<ServerMessage>,
    pub membership: Option<Membership>,
}

impl Connection {
    pub fn new(tx: mpsc::Sender<ServerMessage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tx,
            membership: None,
        }
    }

    fn membership(&self) -> Result<&Membership, SessionError> {
        self.membership.as_ref().ok_or(SessionError::NotInGame)
    }

    fn ensure_not_in_game(&self) -> Result<(), SessionError> {
        match &self.membership {
            Some(m) => Err(SessionError::AlreadyInGame(m.game_id.clone())),
            None => Ok(()),
        }
    }

    fn session_player(&self, username: String) -> SessionPlayer {
        SessionPlayer {
            connection_id: self.id,
            username,
            tx: self.tx.clone(),
        }
    }
}

/// WebSocket upgrade handler
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);
    let mut conn = Connection::new(tx);

    tracing::info!(
        "User has connected ({}). {} game(s) running",
        conn.id,
        state.games.len()
    );

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let recv = async {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) =
                            handle_client_message(client_msg, &state.games, &mut conn).await
                        {
                            let error_msg = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            let _ = conn.tx.send(error_msg).await;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = conn.tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => break,
                _ => {}
            }
        }
    };

    // Wait for either side to finish
    tokio::select! {
        _ = (&mut send_task) => {}
        _ = recv => {}
    }
    send_task.abort();

    if let Err(e) = leave(&state.games, &mut conn).await {
        tracing::warn!("Cleanup for connection {} failed: {}", conn.id, e);
    }

    tracing::info!("User has disconnected ({})", conn.id);
}

/// Send one message to every recipient, skipping closed connections
pub async fn broadcast(recipients: &[mpsc::Sender<ServerMessage>], message: ServerMessage) {
    for tx in recipients {
        let _ = tx.send(message.clone()).await;
    }
}

/// Drop the connection from its game, if any, and tell the others
async fn leave(games: &GameRegistry, conn: &mut Connection) -> Result<(), SessionError> {
    let Some(Membership { game_id, username }) = conn.membership.take() else {
        return Ok(());
    };

    tracing::info!("[{}] {} left game", game_id, username);

    if let Some(update) = games.leave_game(&game_id, &username)? {
        broadcast(&update.recipients, ServerMessage::PlayerLeft { username }).await;
        broadcast(&update.recipients, update.team_settings).await;
    }
    Ok(())
}

/// Handle individual client messages
pub async fn handle_client_message(
    msg: ClientMessage,
    games: &GameRegistry,
    conn: &mut Connection,
) -> anyhow::Result<()> {
    match msg {
        ClientMessage::CreateGame { username } => {
            conn.ensure_not_in_game()?;
            let game_id = games.create_game(conn.session_player(username.clone()))?;
            tracing::info!("{} created new game {}", username, game_id);

            conn.membership = Some(Membership {
                game_id: game_id.clone(),
                username,
            });
            conn.tx.send(ServerMessage::GameCreated { game_id: game_id.clone() }).await?;

            let (_, update) = games.update(&game_id, |_| Ok(()))?;
            broadcast(&update.recipients, update.team_settings).await;
        }
        ClientMessage::JoinGame { game_id, username } => {
            conn.ensure_not_in_game()?;
            let update = match games.join_game(&game_id, conn.session_player(username.clone())) {
                Ok(update) => update,
                Err(e) => {
                    tracing::warn!("{} is unable to join game {}: {}", username, game_id, e);
                    return Err(e.into());
                }
            };
            tracing::info!("[{}] {} joined game", game_id, username);

            conn.membership = Some(Membership {
                game_id: game_id.clone(),
                username,
            });
            conn.tx.send(ServerMessage::GameJoined { game_id }).await?;
            broadcast(&update.recipients, update.team_settings).await;
        }
        ClientMessage::LeaveGame => {
            conn.membership()?;
            leave(games, conn).await?;
        }
        ClientMessage::SelectTeam { team } => {
            let Membership { game_id, username } = conn.membership()?;
            let team: TeamId = team.parse().map_err(SessionError::from)?;
            tracing::info!("[{}] {} selected to be on {} team", game_id, username, team);

            let (_, update) =
                games.update(game_id, |s| s.game.assign_player_to_team(username, team))?;
            broadcast(&update.recipients, update.team_settings).await;
        }
        ClientMessage::SelectSpymaster { team } => {
            let Membership { game_id, username } = conn.membership()?;
            let team: TeamId = team.parse().map_err(SessionError::from)?;
            tracing::info!("[{}] {} selected to be spymaster on {}", game_id, username, team);

            let (_, update) = games.update(game_id, |s| s.game.assign_spymaster(username, team))?;
            broadcast(&update.recipients, update.team_settings).await;
        }
        ClientMessage::RandomizeTeams => {
            let Membership { game_id, username } = conn.membership()?;
            let (_, update) = games.update(game_id, |s| {
                s.game.assign_teams_randomly()?;
                s.game.choose_spymasters()
            })?;
            tracing::info!("[{}] {} randomized the teams", game_id, username);
            broadcast(&update.recipients, update.team_settings).await;
        }
        ClientMessage::StartGame => {
            let Membership { game_id, username } = conn.membership()?;
            let (_, update) = games.update(game_id, |s| s.game.start())?;
            tracing::info!("[{}] {} started game", game_id, username);
            broadcast(&update.recipients, update.game_state).await;
        }
        ClientMessage::ResetGame => {
            let Membership { game_id, username } = conn.membership()?;
            let (_, update) = games.update(game_id, |s| s.reset())?;
            tracing::info!("[{}] {} reset game", game_id, username);
            broadcast(&update.recipients, update.team_settings).await;
            broadcast(&update.recipients, update.game_state).await;
        }
        ClientMessage::GiveClue { word, count } => {
            let Membership { game_id, username } = conn.membership()?;
            let (_, update) =
                games.update(game_id, |s| s.game.give_clue(username, &word, count))?;
            tracing::info!("[{}] {} provided clue {}:{}", game_id, username, word, count);
            broadcast(&update.recipients, update.game_state).await;
        }
        ClientMessage::SelectWord { word } => {
            let Membership { game_id, username } = conn.membership()?;
            let (outcome, update) = games.update(game_id, |s| s.game.select_word(username, &word))?;
            tracing::info!("[{}] {} selected word {}: {:?}", game_id, username, word, outcome);
            match outcome {
                SelectionOutcome::GameOver {
                    winner,
                    reason: GameOverReason::Assassin,
                } => tracing::info!("[{}] assassin revealed, {} wins", game_id, winner),
                SelectionOutcome::GameOver {
                    winner,
                    reason: GameOverReason::AllCardsFound,
                } => tracing::info!("[{}] all {} cards found", game_id, winner),
                _ => {}
            }
            broadcast(&update.recipients, update.game_state).await;
        }
        ClientMessage::PassTurn => {
            let Membership { game_id, username } = conn.membership()?;
            let (_, update) = games.update(game_id, |s| s.game.pass_turn(username))?;
            tracing::info!("[{}] {} passed turn", game_id, username);
            broadcast(&update.recipients, update.game_state).await;
        }
        ClientMessage::GetState => {
            let Membership { game_id, .. } = conn.membership()?;
            let state = games
                .snapshot(game_id)
                .ok_or_else(|| SessionError::UnknownGame(game_id.clone()))?;
            conn.tx.send(ServerMessage::GameState { state }).await?;
        }
    }

    Ok(())
}
