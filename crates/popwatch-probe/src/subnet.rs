//! Subnet-steered DNS probing.
//!
//! The forward query carries an EDNS client-subnet option so the
//! recursive resolver answers as if the client sat inside the PoP's
//! subnet; the answer is then reverse-resolved to a hostname whose
//! leading segments identify the serving PoP.

use crate::error::{ProbeError, ProbeResult};
use crate::{Probe, ProbeKind};
use async_trait::async_trait;
use hickory_client::client::Client;
use hickory_proto::op::{Edns, Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::opt::{ClientSubnet, EdnsOption};
use hickory_proto::rr::{Name, RData, RecordType};
use hickory_proto::runtime::TokioRuntimeProvider;
use hickory_proto::udp::UdpClientStream;
use hickory_proto::xfer::{DnsHandle, DnsRequest, DnsRequestOptions, FirstAnswer, Protocol};
use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::Resolver;
use ipnet::IpNet;
use popwatch_core::{ExpectedPrefix, Observation, Pop};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, warn};

/// Recursive resolver the queries go to unless configured otherwise
#[must_use]
pub fn default_resolver() -> SocketAddr {
    SocketAddr::from(([8, 8, 8, 8], 53))
}

/// EDNS payload size advertised on the forward query
const MAX_PAYLOAD: u16 = 1232;

/// Probes a PoP by resolving the target domain as if from inside the
/// PoP's subnet, then reverse-resolving the routed address.
pub struct SubnetProbe {
    domain: Name,
    resolver_addr: SocketAddr,
    timeout: Duration,
}

impl SubnetProbe {
    /// Create a subnet probe for the given target domain.
    ///
    /// `resolver_addr` is the recursive resolver used for both the
    /// steered forward query and the reverse lookup; `timeout` bounds
    /// each of the two queries separately.
    pub fn new(
        domain: &str,
        resolver_addr: SocketAddr,
        timeout: Duration,
    ) -> ProbeResult<Self> {
        let domain = Name::from_utf8(domain).map_err(|e| ProbeError::Name(e.to_string()))?;

        Ok(Self {
            domain,
            resolver_addr,
            timeout,
        })
    }

    /// Resolve the target domain with a client-subnet hint, returning the
    /// first address record in the answer.
    async fn forward(&self, subnet: IpNet) -> ProbeResult<Option<IpAddr>> {
        let conn = UdpClientStream::builder(self.resolver_addr, TokioRuntimeProvider::default())
            .build();
        let (mut client, background) = Client::connect(conn)
            .await
            .map_err(|e| ProbeError::Dns(e.to_string()))?;
        tokio::spawn(background);

        let query = Query::query(self.domain.clone(), RecordType::A);

        let mut message = Message::new();
        message
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true)
            .add_query(query);

        let edns = message.extensions_mut().get_or_insert_with(Edns::new);
        edns.set_max_payload(MAX_PAYLOAD);
        edns.set_version(0);
        edns.options_mut().insert(EdnsOption::Subnet(ClientSubnet::new(
            subnet.network(),
            subnet.prefix_len(),
            0,
        )));

        debug!(domain = %self.domain, subnet = %subnet, "steered forward query");

        let response = client
            .send(DnsRequest::new(message, DnsRequestOptions::default()))
            .first_answer()
            .await
            .map_err(|e| ProbeError::Dns(e.to_string()))?;

        Ok(response.answers().iter().find_map(|record| match record.data() {
            RData::A(a) => Some(IpAddr::V4(a.0)),
            RData::AAAA(aaaa) => Some(IpAddr::V6(aaaa.0)),
            _ => None,
        }))
    }

    /// Reverse-resolve an address to its first PTR name, with the root
    /// dot trimmed.
    async fn reverse(&self, ip: IpAddr) -> ProbeResult<Option<String>> {
        let name_servers = vec![NameServerConfig::new(self.resolver_addr, Protocol::Udp)];
        let config = ResolverConfig::from_parts(None, vec![], name_servers);
        let resolver =
            Resolver::builder_with_config(config, TokioConnectionProvider::default()).build();

        let response = resolver
            .reverse_lookup(ip)
            .await
            .map_err(|e| ProbeError::Dns(e.to_string()))?;

        Ok(response
            .iter()
            .next()
            .map(|ptr| ptr.to_string().trim_end_matches('.').to_string()))
    }
}

#[async_trait]
impl Probe for SubnetProbe {
    fn kind(&self) -> ProbeKind {
        ProbeKind::Subnet
    }

    async fn observe(&self, pop: &Pop) -> Observation {
        let ip = match tokio::time::timeout(self.timeout, self.forward(pop.subnet)).await {
            Ok(Ok(Some(ip))) => ip,
            Ok(Ok(None)) => {
                debug!(code = %pop.code, "steered answer held no address record");
                return Observation::NoAddress;
            }
            Ok(Err(e)) => {
                warn!(code = %pop.code, error = %e, "forward query failed");
                return Observation::NoAddress;
            }
            Err(_) => {
                warn!(code = %pop.code, "forward query timed out");
                return Observation::NoAddress;
            }
        };

        let observed = match tokio::time::timeout(self.timeout, self.reverse(ip)).await {
            Ok(Ok(Some(name))) => name,
            Ok(Ok(None)) => String::new(),
            Ok(Err(e)) => {
                warn!(code = %pop.code, ip = %ip, error = %e, "reverse lookup failed");
                String::new()
            }
            Err(_) => {
                warn!(code = %pop.code, ip = %ip, "reverse lookup timed out");
                String::new()
            }
        };

        Observation::Identifier {
            observed,
            expected: ExpectedPrefix::ReverseDns { ip },
        }
    }
}
