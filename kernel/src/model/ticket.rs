use super::id::TicketId;
use strum::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Reserved,
    Paid,
}

#[derive(Debug)]
pub struct Ticket {
    pub ticket_id: TicketId,
    pub status: TicketStatus,
    pub ticket_type: TicketType,
}

#[derive(Debug)]
pub struct TicketType {
    pub is_remote: bool,
    pub includes_hotel: bool,
}

impl Ticket {
    // 宿泊予約が可能なチケットかどうか。
    // 支払い済みかつ現地参加かつホテル付きのチケットのみ予約操作を許可する
    pub fn grants_booking(&self) -> bool {
        self.status != TicketStatus::Reserved
            && !self.ticket_type.is_remote
            && self.ticket_type.includes_hotel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paid_hotel_ticket() -> Ticket {
        Ticket {
            ticket_id: TicketId::new(1),
            status: TicketStatus::Paid,
            ticket_type: TicketType {
                is_remote: false,
                includes_hotel: true,
            },
        }
    }

    #[test]
    fn paid_in_person_hotel_ticket_grants_booking() {
        assert!(paid_hotel_ticket().grants_booking());
    }

    #[test]
    fn reserved_ticket_does_not_grant_booking() {
        let mut ticket = paid_hotel_ticket();
        ticket.status = TicketStatus::Reserved;
        assert!(!ticket.grants_booking());
    }

    #[test]
    fn remote_ticket_does_not_grant_booking() {
        let mut ticket = paid_hotel_ticket();
        ticket.ticket_type.is_remote = true;
        assert!(!ticket.grants_booking());
    }

    #[test]
    fn ticket_without_hotel_does_not_grant_booking() {
        let mut ticket = paid_hotel_ticket();
        ticket.ticket_type.includes_hotel = false;
        assert!(!ticket.grants_booking());
    }

    #[test]
    fn status_parses_from_database_representation() {
        assert_eq!("PAID".parse::<TicketStatus>().unwrap(), TicketStatus::Paid);
        assert_eq!(
            "RESERVED".parse::<TicketStatus>().unwrap(),
            TicketStatus::Reserved
        );
    }
}
