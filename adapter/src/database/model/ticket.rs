use kernel::model::{
    id::TicketId,
    ticket::{Ticket, TicketStatus, TicketType},
};
use shared::error::AppError;

// チケットとチケット種別を INNER JOIN で一緒に取得する際に使う型。
// status は TEXT カラムなので、ドメインの enum への変換は TryFrom で行う
#[derive(sqlx::FromRow)]
pub struct TicketRow {
    pub ticket_id: TicketId,
    pub status: String,
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = AppError;

    fn try_from(value: TicketRow) -> Result<Self, Self::Error> {
        let TicketRow {
            ticket_id,
            status,
            is_remote,
            includes_hotel,
        } = value;
        let status = status.parse::<TicketStatus>().map_err(|_| {
            AppError::ConversionEntityError(format!("不明なチケットステータスです: {status}"))
        })?;
        Ok(Ticket {
            ticket_id,
            status,
            ticket_type: TicketType {
                is_remote,
                includes_hotel,
            },
        })
    }
}
